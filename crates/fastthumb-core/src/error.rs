//! Error types for codec operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while driving a codec session.
///
/// Every failure is returned to the immediate caller; nothing is retried and
/// no failure is fatal to the process. All paths release previously-acquired
/// codec resources before returning.
#[derive(Debug, Error)]
pub enum Error {
    /// The input buffer could not be opened as a JPEG image.
    #[error("could not decode input image")]
    DecodeOpen,

    /// The input file could not be opened as a JPEG image
    /// (missing, unreadable, or not a JPEG).
    #[error("could not open image {}", .path.display())]
    FileOpen {
        /// Path the open was attempted on.
        path: PathBuf,
    },

    /// The encode step reported failure.
    ///
    /// The codec exposes no diagnostic text on this path, so none is carried.
    #[error("encode error")]
    Encode,

    /// The transform step reported failure.
    #[error("transform error: error {code}: {message}")]
    Transform {
        /// Status code returned by the codec.
        code: i32,
        /// Diagnostic text retrieved from the codec handle.
        message: String,
    },

    /// The requested transform selector is outside the supported enumeration.
    #[error("invalid transformation: {0}")]
    InvalidTransform(i32),
}
