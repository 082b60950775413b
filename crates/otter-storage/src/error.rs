//! Storage error types

use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failures that escape a storage operation.
///
/// Invalid keys are not represented here: they are reported through the
/// store's diagnostic sink and surface as sentinel return values.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage is not supported in this environment")]
    Unsupported,

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid time-to-live: {0:?}")]
    InvalidTtl(String),

    #[error("Invalid zone pattern: {0}")]
    InvalidZone(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    pub(crate) fn backend(err: impl std::fmt::Display) -> Self {
        StorageError::Backend(err.to_string())
    }
}
