//! Error types for frame filters.

use thiserror::Error;

/// Error type for frame filters.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Filter identifier is not registered.
    #[error("unknown filter: {0}")]
    UnknownFilter(String),

    /// Kernel size outside the range an operator accepts.
    #[error("invalid kernel size {size} for {op}: {reason}")]
    InvalidKernelSize {
        /// Operator name
        op: &'static str,
        /// Requested size
        size: usize,
        /// Accepted range
        reason: &'static str,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Source and destination frames differ in size.
    #[error("size mismatch: {0}")]
    SizeMismatch(String),

    /// Frame construction or merge failed.
    #[error(transparent)]
    Frame(#[from] cameo_core::Error),

    /// Curve or lookup table failure.
    #[error(transparent)]
    Curve(#[from] cameo_curve::CurveError),
}

/// Result type for frame filters.
pub type OpsResult<T> = Result<T, OpsError>;

/// Fails with [`OpsError::SizeMismatch`] unless both frames share dimensions.
pub(crate) fn ensure_same_size(src: &cameo_core::Frame, dst: &cameo_core::Frame) -> OpsResult<()> {
    if src.same_shape(dst) {
        return Ok(());
    }
    let (sw, sh) = src.dimensions();
    let (dw, dh) = dst.dimensions();
    Err(OpsError::SizeMismatch(format!(
        "source {sw}x{sh}, destination {dw}x{dh}"
    )))
}
