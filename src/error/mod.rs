//! Error types for chunklines.

use thiserror::Error;

/// Result type returned by reader operations.
pub type Result<T> = std::result::Result<T, LineError>;

/// Errors that can occur while reading lines.
///
/// Running out of input is not an error: [`LineReader::next`](crate::LineReader::next)
/// returns `Ok(None)` for that.
#[derive(Debug, Error)]
pub enum LineError {
    /// An I/O error occurred while opening, reading or closing the source.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// The operation needs a seekable source.
    #[error("{operation} is not supported on a non-seekable source")]
    Unsupported {
        /// Name of the rejected operation.
        operation: &'static str,
    },

    /// The reader has already been closed.
    #[error("reader is closed")]
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: LineError = io_err.into();
        assert!(matches!(err, LineError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_display() {
        let err = LineError::Unsupported { operation: "reset" };
        assert_eq!(err.to_string(), "reset is not supported on a non-seekable source");

        let err = LineError::InvalidConfig {
            message: "chunk size must be non-zero",
        };
        assert!(err.to_string().contains("invalid config"));
    }
}
