//! Error types for codec operations.
//!
//! Provides unified error handling for decoding, encoding, and file I/O.

use std::io;
use thiserror::Error;

/// Codec operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Recognized but unsupported format magic (the binary P4/P5/P6 family).
    #[error("unsupported format {0}: only plain-text P1/P2/P3 are supported")]
    UnsupportedFormat(String),

    /// Malformed header or pixel body.
    #[error("parse error: {0}")]
    Parse(String),

    /// A core invariant failed while assembling the decoded image.
    #[error(transparent)]
    Core(#[from] pnm_core::Error),
}

/// Result type for codec operations.
pub type IoResult<T> = Result<T, IoError>;
