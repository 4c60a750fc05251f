//! Error types for the content model library.
//!
//! Editing operations themselves never fail: "not applicable" outcomes are
//! reported through return values. Errors only surface at the boundaries,
//! when reading snapshots, parsing HTML or doing I/O.

use std::io;
use thiserror::Error;

/// Result type alias for content model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur at the content model boundaries.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A JSON snapshot could not be read or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTML input could not be parsed.
    #[error("HTML parse error at {position}: {message}")]
    HtmlParse {
        /// Byte offset into the input where parsing stopped
        position: usize,
        /// What went wrong
        message: String,
    },

    /// The model violates a structural expectation of the caller.
    #[error("Invalid content model: {0}")]
    InvalidModel(String),

    /// Error during rendering (HTML, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::HtmlParse {
            position: 12,
            message: "unterminated tag".to_string(),
        };
        assert_eq!(err.to_string(), "HTML parse error at 12: unterminated tag");

        let err = Error::InvalidModel("table has no rows".to_string());
        assert_eq!(err.to_string(), "Invalid content model: table has no rows");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
