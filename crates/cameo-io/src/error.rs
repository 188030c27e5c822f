//! Error types for frame I/O.

use std::io;
use thiserror::Error;

/// Frame I/O error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Decoding error.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Codec name or FourCC not recognized.
    #[error("unsupported codec: {0}")]
    UnsupportedCodec(String),

    /// Frame size differs from the stream size.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected size.
        expected: String,
        /// Actual size.
        actual: String,
    },

    /// Invalid stream or source parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Frame construction failed.
    #[error(transparent)]
    Frame(#[from] cameo_core::Error),
}

/// Result type for frame I/O.
pub type IoResult<T> = Result<T, IoError>;

impl IoError {
    /// [`IoError::DimensionMismatch`] from two `(width, height)` pairs.
    pub fn dimension_mismatch(expected: (u32, u32), actual: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            expected: format!("{}x{}", expected.0, expected.1),
            actual: format!("{}x{}", actual.0, actual.1),
        }
    }
}
