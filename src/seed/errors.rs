//! # Seed Errors

use thiserror::Error;

use crate::store::StoreError;

/// Result type for seeding
pub type SeedResult<T> = Result<T, SeedError>;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file {path}: {message}")]
    Read { path: String, message: String },

    #[error("Invalid seed file {path}: {message}")]
    Parse { path: String, message: String },

    /// Seed record date is not `YYYY-MM-DD`
    #[error("Invalid date in seed record: {0}")]
    InvalidDate(String),

    #[error("{0}")]
    Store(#[from] StoreError),
}
