use thiserror::Error;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
}

/// Errors raised by the storage layer.
///
/// Absence of a code is never an error: lookups return `Ok(None)` for
/// unknown codes. `Conflict` means a code is already bound to a
/// different URL; a bound URL is immutable once set.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("code already maps to a different url: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}
