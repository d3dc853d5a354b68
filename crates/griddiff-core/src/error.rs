//! Unified error types for the griddiff crates
//!
//! This module provides a common error type [`DiffError`] shared by the
//! engine, the io layer and the CLI. Domain-specific failures are converted
//! to `DiffError` for uniform handling at API boundaries.

use thiserror::Error;

/// Unified error type for all griddiff operations.
#[derive(Error, Debug)]
pub enum DiffError {
    /// I/O errors (file access, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing/deserialization errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network structure errors
    #[error("Network error: {0}")]
    Network(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using DiffError.
pub type DiffResult<T> = Result<T, DiffError>;

// Conversion from anyhow::Error
impl From<anyhow::Error> for DiffError {
    fn from(err: anyhow::Error) -> Self {
        DiffError::Other(err.to_string())
    }
}

// Conversion from string-like types for convenience
impl From<String> for DiffError {
    fn from(s: String) -> Self {
        DiffError::Other(s)
    }
}

impl From<&str> for DiffError {
    fn from(s: &str) -> Self {
        DiffError::Other(s.to_string())
    }
}

// JSON serialization errors
impl From<serde_json::Error> for DiffError {
    fn from(err: serde_json::Error) -> Self {
        DiffError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DiffError::Config("negative threshold".into());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("negative threshold"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let diff_err: DiffError = io_err.into();
        assert!(matches!(diff_err, DiffError::Io(_)));
    }

    #[test]
    fn test_question_mark_operator() {
        fn inner() -> DiffResult<()> {
            Err(DiffError::Network("test".into()))
        }

        fn outer() -> DiffResult<()> {
            inner()?;
            Ok(())
        }

        assert!(outer().is_err());
    }
}
