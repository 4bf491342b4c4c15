//! Durable key-value storage protocol definitions.
//!
//! Holds the API key, the structure cache entry and the recent-folders list.
//! Values must survive restarts of the UI process.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::StoreError;

/// Core trait for key-value storage backends.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the given keys. Missing keys are absent from the result.
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>, StoreError>;

    /// Store every entry of `items`, overwriting existing values.
    async fn set(&self, items: Map<String, Value>) -> Result<(), StoreError>;

    /// Remove a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Fetch a single key.
    async fn get_one(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let mut values = self.get(&[key]).await?;
        Ok(values.remove(key))
    }

    /// Store a single key.
    async fn set_one(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut items = Map::new();
        items.insert(key.to_string(), value);
        self.set(items).await
    }
}
