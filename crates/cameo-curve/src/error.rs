//! Curve and lookup table error types.

use thiserror::Error;

/// Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Errors that can occur while building curves or applying tables.
#[derive(Debug, Error)]
pub enum CurveError {
    /// Control point inputs are not strictly increasing.
    #[error("control point {index} input {current} does not exceed previous input {previous}")]
    NonIncreasing {
        /// Index of the offending point
        index: usize,
        /// Input of the point before it
        previous: f64,
        /// Input of the offending point
        current: f64,
    },

    /// A control point coordinate is NaN or infinite.
    #[error("control point {index} is not finite: ({x}, {y})")]
    NonFinite {
        /// Index of the offending point
        index: usize,
        /// Input coordinate
        x: f64,
        /// Output coordinate
        y: f64,
    },

    /// Not enough control points for the requested interpolant.
    #[error("{points} control points supplied, at least {min} required")]
    TooFewPoints {
        /// Number of control points supplied
        points: usize,
        /// Minimum number required
        min: usize,
    },

    /// Spline system could not be solved.
    #[error("singular spline system for {points} control points")]
    SingularSystem {
        /// Number of control points
        points: usize,
    },

    /// Table has fewer entries than the sample type has levels.
    #[error("lookup table has {len} entries, samples need {levels}")]
    TableTooShort {
        /// Table length
        len: usize,
        /// Levels required by the sample type
        levels: usize,
    },

    /// Source and destination buffers differ in length.
    #[error("buffer length mismatch: source {src}, destination {dst}")]
    LengthMismatch {
        /// Source length
        src: usize,
        /// Destination length
        dst: usize,
    },
}
