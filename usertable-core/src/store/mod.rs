//! Record persistence as an opaque blob.

mod backend;
mod memory;

pub use backend::{BackendError, BlobBackend};
pub use memory::MemoryBackend;

use std::sync::Arc;

use log::{info, warn};
use thiserror::Error;

use crate::generate;
use crate::record::Record;

/// Key the record blob is stored under.
pub const RECORDS_KEY: &str = "users";

/// Record store error type.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("serialization error: {0}")]
    Serialization(serde_json::Error),
    #[error("deserialization error: {0}")]
    Deserialization(serde_json::Error),
}

/// Reads and writes the record sequence as a JSON blob.
#[derive(Clone)]
pub struct RecordStore {
    backend: Arc<dyn BlobBackend>,
    key: String,
}

impl RecordStore {
    /// Create a store over the given backend.
    pub fn new(backend: impl BlobBackend + 'static) -> Self {
        Self::from_shared(Arc::new(backend))
    }

    /// Create a store over a backend shared with other users.
    pub fn from_shared(backend: Arc<dyn BlobBackend>) -> Self {
        Self {
            backend,
            key: RECORDS_KEY.to_string(),
        }
    }

    /// Use a different key for the blob.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Read the stored records.
    ///
    /// `Ok(None)` when nothing is stored; an error when the blob is malformed.
    pub async fn load(&self) -> Result<Option<Vec<Record>>, StoreError> {
        match self.backend.get(&self.key).await? {
            Some(bytes) => Ok(Some(
                serde_json::from_slice(&bytes).map_err(StoreError::Deserialization)?,
            )),
            None => Ok(None),
        }
    }

    /// Replace the stored records.
    pub async fn save(&self, records: &[Record]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(records).map_err(StoreError::Serialization)?;
        self.backend.set(&self.key, bytes).await?;
        Ok(())
    }

    /// Remove the stored records.
    pub async fn clear(&self) -> Result<(), StoreError> {
        self.backend.delete(&self.key).await?;
        Ok(())
    }

    /// Load the stored records, or generate and persist `count` fresh ones.
    ///
    /// A malformed blob is logged and replaced, never reported.
    pub async fn load_or_generate(&self, count: usize) -> Result<Vec<Record>, StoreError> {
        self.load_or_else(|| generate::generate(count)).await
    }

    /// Like [`load_or_generate`](Self::load_or_generate) with a custom producer.
    pub async fn load_or_else<F>(&self, produce: F) -> Result<Vec<Record>, StoreError>
    where
        F: FnOnce() -> Vec<Record>,
    {
        match self.load().await {
            Ok(Some(records)) => {
                info!("Loaded {} records from store", records.len());
                return Ok(records);
            }
            Ok(None) => info!("No stored records, generating"),
            Err(StoreError::Deserialization(e)) => {
                warn!("Failed to parse stored records, regenerating: {}", e);
            }
            Err(e) => return Err(e),
        }

        let records = produce();
        self.save(&records).await?;
        info!("Generated and stored {} records", records.len());
        Ok(records)
    }

    /// Drop the stored records and persist a fresh set of `count`.
    pub async fn regenerate(&self, count: usize) -> Result<Vec<Record>, StoreError> {
        self.clear().await?;
        let records = generate::generate(count);
        self.save(&records).await?;
        info!("Regenerated {} records", records.len());
        Ok(records)
    }
}
