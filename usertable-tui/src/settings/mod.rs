//! Settings system for typed key-value storage.

mod sqlite;

pub use sqlite::SqliteBackend;

use std::sync::Arc;

use log::{info, warn};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use usertable_core::{BackendError, BlobBackend, TableConfig};

/// Key the table configuration is stored under.
pub const TABLE_CONFIG_KEY: &str = "table.config";

/// Settings error type.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("serialization error: {0}")]
    Serialization(bincode::Error),
    #[error("deserialization error: {0}")]
    Deserialization(bincode::Error),
}

/// Typed settings provider.
///
/// Wraps a `BlobBackend` with typed serialization via bincode.
#[derive(Clone)]
pub struct SettingsProvider {
    backend: Arc<dyn BlobBackend>,
}

impl SettingsProvider {
    /// Create a new settings provider with the given backend.
    #[cfg(test)]
    pub fn new(backend: impl BlobBackend + 'static) -> Self {
        Self::from_shared(Arc::new(backend))
    }

    /// Create a settings provider over a backend shared with the record store.
    pub fn from_shared(backend: Arc<dyn BlobBackend>) -> Self {
        Self { backend }
    }

    /// Get a typed value for a key.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SettingsError> {
        match self.backend.get(key).await? {
            Some(bytes) => Ok(Some(
                bincode::deserialize(&bytes).map_err(SettingsError::Deserialization)?,
            )),
            None => Ok(None),
        }
    }

    /// Set a typed value for a key.
    pub async fn set<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), SettingsError> {
        let bytes = bincode::serialize(value).map_err(SettingsError::Serialization)?;
        self.backend.set(key, bytes).await?;
        Ok(())
    }

    /// Load the table configuration.
    ///
    /// Missing or unreadable configuration is replaced by the defaults, which
    /// are written back.
    pub async fn table_config(&self) -> Result<TableConfig, SettingsError> {
        match self.get::<TableConfig>(TABLE_CONFIG_KEY).await {
            Ok(Some(config)) => return Ok(config.sanitized()),
            Ok(None) => info!("No table config stored, writing defaults"),
            Err(SettingsError::Deserialization(e)) => {
                warn!("Failed to parse table config, resetting: {}", e);
            }
            Err(e) => return Err(e),
        }

        let config = TableConfig::default();
        self.set(TABLE_CONFIG_KEY, &config).await?;
        Ok(config)
    }

    /// Persist the table configuration.
    pub async fn save_table_config(&self, config: &TableConfig) -> Result<(), SettingsError> {
        self.set(TABLE_CONFIG_KEY, config).await
    }
}

#[cfg(test)]
mod tests {
    use usertable_core::{MemoryBackend, RenderMode};

    use super::*;

    #[tokio::test]
    async fn test_get_set_roundtrip() {
        let settings = SettingsProvider::new(MemoryBackend::new());
        assert_eq!(settings.get::<u32>("answer").await.unwrap(), None);

        settings.set("answer", &42u32).await.unwrap();
        assert_eq!(settings.get::<u32>("answer").await.unwrap(), Some(42));
    }

    #[tokio::test]
    async fn test_table_config_defaults_written_back() {
        let backend = Arc::new(MemoryBackend::new());
        let settings = SettingsProvider::from_shared(backend.clone());

        let config = settings.table_config().await.unwrap();
        assert_eq!(config, TableConfig::default());
        assert!(backend.contains(TABLE_CONFIG_KEY));
    }

    #[tokio::test]
    async fn test_table_config_saved_mode_is_loaded() {
        let settings = SettingsProvider::new(MemoryBackend::new());
        let config = TableConfig {
            render_mode: RenderMode::Full,
            ..TableConfig::default()
        };
        settings.save_table_config(&config).await.unwrap();

        assert_eq!(settings.table_config().await.unwrap().render_mode, RenderMode::Full);
    }

    #[tokio::test]
    async fn test_table_config_corrupt_resets() {
        let settings = SettingsProvider::new(
            MemoryBackend::new().with_entry(TABLE_CONFIG_KEY, vec![0xff]),
        );

        assert_eq!(settings.table_config().await.unwrap(), TableConfig::default());
        assert_eq!(
            settings.get::<TableConfig>(TABLE_CONFIG_KEY).await.unwrap(),
            Some(TableConfig::default())
        );
    }

    #[tokio::test]
    async fn test_table_config_sanitized_on_load() {
        let settings = SettingsProvider::new(MemoryBackend::new());
        let config = TableConfig {
            row_height: 0,
            ..TableConfig::default()
        };
        settings.save_table_config(&config).await.unwrap();

        assert_eq!(settings.table_config().await.unwrap().row_height, 1);
    }
}
