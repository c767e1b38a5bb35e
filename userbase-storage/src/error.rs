//! Error types for the storage layer.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Another record already holds this email.
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// Stored data could not be read back.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// A thread panicked while holding the store lock.
    #[error("store lock poisoned")]
    LockPoisoned,
}
