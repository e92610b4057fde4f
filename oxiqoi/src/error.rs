//! Error types for QOI encoding and decoding.

use std::io;
use thiserror::Error;

/// The main error type for QOI operations.
#[derive(Debug, Error)]
pub enum QoiError {
    /// I/O error from the underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The stream does not start with the `"qoif"` magic bytes.
    #[error("Invalid magic number: expected {expected:02x?}, found {found:02x?}")]
    InvalidMagic {
        /// Expected magic bytes.
        expected: [u8; 4],
        /// Actual bytes found at the start of the stream.
        found: [u8; 4],
    },

    /// The header colorspace byte is neither 0 (sRGB) nor 1 (linear).
    #[error("Invalid colorspace byte: {value} (must be 0 or 1)")]
    InvalidColorspace {
        /// The offending byte.
        value: u8,
    },

    /// Structural violation of the QOI stream layout.
    #[error("Invalid QOI stream: {message}")]
    InvalidFormat {
        /// Description of the violation.
        message: String,
    },
}

/// Result type alias for QOI operations.
pub type Result<T> = std::result::Result<T, QoiError>;

impl QoiError {
    /// Create an invalid magic error.
    pub fn invalid_magic(found: [u8; 4]) -> Self {
        Self::InvalidMagic {
            expected: crate::header::QOI_MAGIC,
            found,
        }
    }

    /// Create an invalid colorspace error.
    pub fn invalid_colorspace(value: u8) -> Self {
        Self::InvalidColorspace { value }
    }

    /// Create an invalid format error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }
}
