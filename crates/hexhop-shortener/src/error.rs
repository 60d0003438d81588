use hexhop_core::StorageError;
use hexhop_generator::GenerateError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ShortenError {
    /// Every candidate code for the URL collided with a different URL.
    /// Surfaced as a failed write; nothing was stored.
    #[error("no unique short code available for this url")]
    Exhausted,
    /// A concurrent writer claimed the generated code for a different
    /// URL between generation and the store write.
    #[error("short code was claimed concurrently: {0}")]
    Conflict(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<GenerateError> for ShortenError {
    fn from(value: GenerateError) -> Self {
        match value {
            GenerateError::Exhausted => Self::Exhausted,
            GenerateError::Lookup(e) => e.into(),
        }
    }
}

impl From<StorageError> for ShortenError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::Conflict(code) => Self::Conflict(code),
            other => Self::Storage(other.to_string()),
        }
    }
}
