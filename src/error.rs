//! Error types for unlayout library.

use std::io;
use thiserror::Error;

/// Result type alias for unlayout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while analyzing a layout.
///
/// Only structurally invalid input is an error. A page without a detectable
/// header, or a table without a continuation, is an ordinary outcome and is
/// reported through the returned values instead.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading a layout file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error decoding or encoding JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The layout is structurally malformed.
    #[error("Malformed layout: {0}")]
    MalformedLayout(String),

    /// A table or paragraph references a page that the layout does not contain.
    #[error("Page {0} is not present in the layout")]
    PageNotFound(u32),

    /// A page or paragraph has no span where one is required.
    #[error("Missing span: {0}")]
    MissingSpan(String),

    /// A page span points outside the content buffer.
    #[error("Span at offset {offset} with length {length} exceeds content length {content_length}")]
    SpanOutOfRange {
        /// Span offset
        offset: usize,
        /// Span length
        length: usize,
        /// Length of the content buffer in characters
        content_length: usize,
    },

    /// Chunking options that would never make progress.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
}

impl Error {
    /// Check if this error describes a structurally invalid layout.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Error::MalformedLayout(_)
                | Error::PageNotFound(_)
                | Error::MissingSpan(_)
                | Error::SpanOutOfRange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::PageNotFound(7);
        assert_eq!(err.to_string(), "Page 7 is not present in the layout");

        let err = Error::SpanOutOfRange {
            offset: 10,
            length: 5,
            content_length: 12,
        };
        assert_eq!(
            err.to_string(),
            "Span at offset 10 with length 5 exceeds content length 12"
        );
    }

    #[test]
    fn test_is_malformed() {
        assert!(Error::PageNotFound(1).is_malformed());
        assert!(Error::MissingSpan("page 1".into()).is_malformed());
        assert!(!Error::InvalidOptions("overlap".into()).is_malformed());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_malformed());
    }
}
