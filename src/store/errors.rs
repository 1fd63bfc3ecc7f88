//! # Store Errors
//!
//! Error types for document store backends.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Document store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The backend driver reported a failure
    #[error("Store backend error: {0}")]
    Backend(String),

    /// A document with the same `_id` already exists
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// An update tried to change `_id`; holds the offending path
    #[error("Performing an update on the path '{0}' would modify the immutable field '_id'")]
    ImmutableField(String),

    /// An update path is malformed or cannot be applied to the document
    #[error("{0}")]
    InvalidUpdate(String),

    /// In-memory store lock was poisoned by a panicking writer
    #[error("Lock poisoned")]
    LockPoisoned,
}

impl From<mongodb::error::Error> for StoreError {
    fn from(e: mongodb::error::Error) -> Self {
        Self::Backend(e.to_string())
    }
}
