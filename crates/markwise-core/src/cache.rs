//! Single-slot structure cache kept in the durable key-value store.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use markwise_protocols::{BookmarkNode, KeyValueStore, StoreError};

use crate::analyzer::{FolderDigest, StructureStatistics};
use crate::clock::Clock;

/// Storage key of the cache slot.
pub const CACHE_KEY: &str = "bookmarkCache";

/// Default freshness window.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Everything derived from one snapshot of the bookmark tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureBundle {
    pub digest: FolderDigest,
    pub statistics: StructureStatistics,
    pub summary: String,
    /// Folders under the conceptual root at analysis time.
    pub tree: Vec<BookmarkNode>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    data: StructureBundle,
    /// Milliseconds since the Unix epoch.
    timestamp: i64,
}

/// Time-bounded cache of the analyzed structure.
pub struct StructureCache {
    storage: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl StructureCache {
    pub fn new(storage: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            storage,
            clock,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached bundle if it is still fresh.
    ///
    /// Stale and undecodable entries are removed. Storage failures are
    /// logged and reported as a miss.
    pub async fn read(&self) -> Option<StructureBundle> {
        let value = match self.storage.get_one(CACHE_KEY).await {
            Ok(Some(value)) => value,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read structure cache: {}", e);
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_value(value) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Discarding undecodable structure cache entry: {}", e);
                self.remove_quietly().await;
                return None;
            }
        };

        let age = self.clock.now_millis() - entry.timestamp;
        let ttl = i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX);
        if age < ttl {
            debug!(age_ms = age, "Structure cache hit");
            Some(entry.data)
        } else {
            debug!(age_ms = age, "Structure cache expired");
            self.remove_quietly().await;
            None
        }
    }

    /// Overwrite the slot with a freshly timestamped entry.
    pub async fn write(&self, bundle: &StructureBundle) -> Result<(), StoreError> {
        let entry = CacheEntry {
            data: bundle.clone(),
            timestamp: self.clock.now_millis(),
        };
        self.storage
            .set_one(CACHE_KEY, serde_json::to_value(&entry)?)
            .await
    }

    /// Remove the slot unconditionally.
    pub async fn invalidate(&self) -> Result<(), StoreError> {
        debug!("Invalidating structure cache");
        self.storage.remove(CACHE_KEY).await
    }

    async fn remove_quietly(&self) {
        if let Err(e) = self.storage.remove(CACHE_KEY).await {
            warn!("Failed to remove structure cache entry: {}", e);
        }
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
