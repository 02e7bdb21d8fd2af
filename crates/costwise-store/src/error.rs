use thiserror::Error;

/// Errors raised by resource stores.
#[derive(Debug, Error)]
pub enum StorageError {
    /// SQLite error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] rusqlite_migration::Error),

    /// A resource with this name already exists
    #[error("Resource name already exists: {0}")]
    DuplicateName(String),

    /// A stored row could not be decoded into a resource
    #[error("Invalid resource record: {0}")]
    InvalidRecord(String),
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
