//! SQLite blob backend with in-memory cache.

use std::path::Path;

use async_sqlite::Client;
use async_trait::async_trait;
use dashmap::DashMap;
use log::debug;
use rusqlite::OptionalExtension;
use usertable_core::{BackendError, BlobBackend};

/// SQLite-backed blob storage with DashMap cache.
pub struct SqliteBackend {
    client: Client,
    cache: DashMap<String, Vec<u8>>,
}

impl SqliteBackend {
    /// Open (or create) the database at the given path.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, BackendError> {
        let path = path.as_ref();
        debug!("Opening blob store at {}", path.display());

        let client = async_sqlite::ClientBuilder::new()
            .path(path)
            .open()
            .await
            .map_err(BackendError::new)?;

        client
            .conn(|conn| {
                conn.execute(
                    "CREATE TABLE IF NOT EXISTS blobs (
                        key TEXT PRIMARY KEY,
                        value BLOB NOT NULL
                    )",
                    [],
                )
            })
            .await
            .map_err(BackendError::new)?;

        Ok(Self {
            client,
            cache: DashMap::new(),
        })
    }
}

#[async_trait]
impl BlobBackend for SqliteBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError> {
        if let Some(value) = self.cache.get(key) {
            return Ok(Some(value.clone()));
        }

        let key_owned = key.to_string();
        let result = self
            .client
            .conn(move |conn| {
                conn.query_row(
                    "SELECT value FROM blobs WHERE key = ?",
                    [&key_owned],
                    |row| row.get::<_, Vec<u8>>(0),
                )
                .optional()
            })
            .await
            .map_err(BackendError::new)?;

        if let Some(ref value) = result {
            self.cache.insert(key.to_string(), value.clone());
        }

        Ok(result)
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), BackendError> {
        let key_owned = key.to_string();
        let value_clone = value.clone();

        self.client
            .conn(move |conn| {
                conn.execute(
                    "INSERT INTO blobs (key, value) VALUES (?, ?)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                    rusqlite::params![&key_owned, &value_clone],
                )
            })
            .await
            .map_err(BackendError::new)?;

        self.cache.insert(key.to_string(), value);

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), BackendError> {
        let key_owned = key.to_string();

        self.client
            .conn(move |conn| conn.execute("DELETE FROM blobs WHERE key = ?", [&key_owned]))
            .await
            .map_err(BackendError::new)?;

        self.cache.remove(key);

        Ok(())
    }
}
