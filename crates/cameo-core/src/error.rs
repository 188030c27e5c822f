//! Error types for frame and plane operations.
//!
//! Every failure here is a shape problem: a buffer whose length does not
//! match its declared dimensions, or two buffers that were expected to
//! share a size and do not.
//!
//! # Usage
//!
//! ```rust
//! use cameo_core::{Error, Result};
//!
//! fn check(len: usize, width: u32, height: u32) -> Result<()> {
//!     if len != width as usize * height as usize * 3 {
//!         return Err(Error::invalid_dimensions(width, height, "bad length"));
//!     }
//!     Ok(())
//! }
//! assert!(check(12, 2, 2).is_ok());
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while constructing or combining frames.
#[derive(Debug, Error)]
pub enum Error {
    /// Buffer length does not match the declared dimensions.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Two buffers that must share a size do not.
    #[error("dimension mismatch: {a_width}x{a_height} vs {b_width}x{b_height}")]
    DimensionMismatch {
        /// First buffer width
        a_width: u32,
        /// First buffer height
        a_height: u32,
        /// Second buffer width
        b_width: u32,
        /// Second buffer height
        b_height: u32,
    },

    /// Wrong number of channel planes supplied to a merge.
    #[error("channel mismatch: expected {expected}, got {got}")]
    ChannelMismatch {
        /// Expected channel count
        expected: usize,
        /// Actual channel count
        got: usize,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::DimensionMismatch`] error.
    #[inline]
    pub fn dimension_mismatch(a: (u32, u32), b: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            a_width: a.0,
            a_height: a.1,
            b_width: b.0,
            b_height: b.1,
        }
    }

    /// Creates an [`Error::ChannelMismatch`] error.
    #[inline]
    pub fn channel_mismatch(expected: usize, got: usize) -> Self {
        Self::ChannelMismatch { expected, got }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch() {
        let err = Error::dimension_mismatch((640, 480), (320, 240));
        let msg = err.to_string();
        assert!(msg.contains("640x480"));
        assert!(msg.contains("320x240"));
    }

    #[test]
    fn test_invalid_dimensions() {
        let err = Error::invalid_dimensions(4, 4, "expected 48 elements, got 12");
        assert!(err.to_string().contains("expected 48"));
    }
}
