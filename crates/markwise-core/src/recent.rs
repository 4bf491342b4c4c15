//! Most-recently-used folder paths.

use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use markwise_protocols::{KeyValueStore, StoreError};

/// Storage key of the recent list.
pub const RECENT_FOLDERS_KEY: &str = "recentFolders";

/// Paths kept in the list.
pub const RECENT_FOLDERS_LIMIT: usize = 5;

/// Persisted MRU list of folder paths.
pub struct RecentFolders {
    storage: Arc<dyn KeyValueStore>,
    limit: usize,
}

impl RecentFolders {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            limit: RECENT_FOLDERS_LIMIT,
        }
    }

    /// Most recent first. Storage problems yield an empty list.
    pub async fn list(&self) -> Vec<String> {
        match self.storage.get_one(RECENT_FOLDERS_KEY).await {
            Ok(Some(value)) => decode(value),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to load recent folders: {}", e);
                Vec::new()
            }
        }
    }

    /// Move `path` to the front of the list.
    pub async fn record(&self, path: &str) -> Result<(), StoreError> {
        let mut paths = self.list().await;
        paths.retain(|p| p != path);
        paths.insert(0, path.to_string());
        paths.truncate(self.limit);

        self.storage
            .set_one(RECENT_FOLDERS_KEY, serde_json::to_value(paths)?)
            .await
    }
}

fn decode(value: Value) -> Vec<String> {
    match serde_json::from_value(value) {
        Ok(paths) => paths,
        Err(e) => {
            warn!("Ignoring malformed recent folders list: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FailingKeyValueStore;
    use markwise_store_local::MemoryKeyValueStore;
    use serde_json::json;

    fn recent() -> (RecentFolders, Arc<MemoryKeyValueStore>) {
        let storage = Arc::new(MemoryKeyValueStore::new());
        (RecentFolders::new(storage.clone()), storage)
    }

    #[tokio::test]
    async fn test_empty_list() {
        let (recent, _) = recent();
        assert!(recent.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_record_moves_to_front() {
        let (recent, storage) = recent();
        recent.record("A").await.unwrap();
        recent.record("B").await.unwrap();
        recent.record("A").await.unwrap();

        assert_eq!(recent.list().await, ["A", "B"]);
        assert_eq!(
            storage.get_one(RECENT_FOLDERS_KEY).await.unwrap(),
            Some(json!(["A", "B"]))
        );
    }

    #[tokio::test]
    async fn test_record_truncates() {
        let (recent, _) = recent();
        for path in ["1", "2", "3", "4", "5", "6"] {
            recent.record(path).await.unwrap();
        }
        assert_eq!(recent.list().await, ["6", "5", "4", "3", "2"]);
    }

    #[tokio::test]
    async fn test_malformed_list_is_ignored() {
        let (recent, storage) = recent();
        storage
            .set_one(RECENT_FOLDERS_KEY, json!({"not": "a list"}))
            .await
            .unwrap();

        assert!(recent.list().await.is_empty());
        recent.record("A").await.unwrap();
        assert_eq!(recent.list().await, ["A"]);
    }

    #[tokio::test]
    async fn test_storage_failure() {
        let recent = RecentFolders::new(Arc::new(FailingKeyValueStore));
        assert!(recent.list().await.is_empty());
        assert!(recent.record("A").await.is_err());
    }
}
