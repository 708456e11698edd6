//! # Record Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record store errors
///
/// Display text is passed through to API clients unchanged.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Scan request could not be built
    #[error("Invalid scan expression: {0}")]
    Expression(String),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Scan failed: {0}")]
    Scan(String),

    #[error("Put failed: {0}")]
    Put(String),

    /// Item could not be turned into a record
    #[error("Failed to decode item: {0}")]
    Decode(String),

    /// Record could not be turned into an item
    #[error("Failed to encode record: {0}")]
    Encode(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}
