//! Key-value stores.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::fs;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use markwise_protocols::{KeyValueStore, StoreError};

use crate::atomic::write_atomic;

/// In-memory key-value store for testing.
pub struct MemoryKeyValueStore {
    entries: RwLock<Map<String, Value>>,
}

impl MemoryKeyValueStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Map::new()),
        }
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for MemoryKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>, StoreError> {
        let entries = self.entries.read().await;
        Ok(keys
            .iter()
            .filter_map(|key| entries.get(*key).map(|v| (key.to_string(), v.clone())))
            .collect())
    }

    async fn set(&self, items: Map<String, Value>) -> Result<(), StoreError> {
        self.entries.write().await.extend(items);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// Key-value store persisted as one JSON object file.
///
/// Every write rewrites the whole file through a temp file and rename, so a
/// crash never leaves a half-written store behind. A missing file reads as
/// an empty store.
pub struct FileKeyValueStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Create a store backed by `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        debug!("FileKeyValueStore using {:?}", path);
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Map<String, Value>, StoreError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(StoreError::Serialization(format!(
                "{:?} does not contain a JSON object",
                self.path
            ))),
        }
    }

    async fn save(&self, entries: &Map<String, Value>) -> Result<(), StoreError> {
        let content = serde_json::to_vec_pretty(entries)?;
        write_atomic(&self.path, &content).await
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>, StoreError> {
        let mut entries = self.load().await?;
        Ok(keys
            .iter()
            .filter_map(|key| entries.remove(*key).map(|v| (key.to_string(), v)))
            .collect())
    }

    async fn set(&self, items: Map<String, Value>) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;
        let keys: Vec<String> = items.keys().cloned().collect();
        entries.extend(items);
        self.save(&entries).await?;
        debug!(?keys, "Stored keys");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;
        if entries.remove(key).is_some() {
            self.save(&entries).await?;
            debug!(key, "Removed key");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "kv_tests.rs"]
mod tests;
