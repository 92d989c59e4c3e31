//! Log parsing error types.

use thiserror::Error;

/// Errors that can occur while reading or parsing a log file.
///
/// Only file-level problems surface here. A malformed line or CSV row is
/// dropped by the parser and never becomes an error.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("invalid log format: {0}")]
    Format(String),

    #[error("source not found: {0}")]
    NotFound(String),
}

/// Convenience alias for log parsing results.
pub type LogResult<T> = Result<T, LogError>;
