//! Blob backend trait.

use async_trait::async_trait;
use thiserror::Error;

/// Failure reported by a storage backend.
#[derive(Debug, Error)]
#[error("storage backend error: {message}")]
pub struct BackendError {
    message: String,
}

impl BackendError {
    pub fn new(message: impl std::fmt::Display) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Backend trait for opaque blob storage.
///
/// Implementations handle raw byte storage/retrieval by key.
/// `RecordStore` wraps this with record serialization.
#[async_trait]
pub trait BlobBackend: Send + Sync {
    /// Get raw bytes for a key.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError>;

    /// Set raw bytes for a key.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), BackendError>;

    /// Delete a key.
    async fn delete(&self, key: &str) -> Result<(), BackendError>;
}
