//! The facade the user interface drives.
//!
//! [`BookmarkAssistant`] sequences analysis, caching, recommendation and
//! placement over injected collaborators. Recommendation and creation flows
//! are serialized by a busy flag: a second call while one is in flight fails
//! with [`AssistantError::Busy`] instead of queueing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, warn};

use markwise_protocols::{
    BookmarkNode, BookmarkStore, ExistingBookmark, GenerationSettings, KeyValueStore,
    PlacementOutcome, Recommendation, RecommendationError, RecommendationModel, Tab,
    TabAccessor,
};

use crate::analyzer::{analyze, DEFAULT_MAX_SAMPLES};
use crate::cache::{StructureBundle, StructureCache, DEFAULT_CACHE_TTL};
use crate::clock::{Clock, SystemClock};
use crate::duplicate::find_existing;
use crate::error::AssistantError;
use crate::recent::RecentFolders;
use crate::recommend::{validate_api_key, RecommendationClient};
use crate::resolver::{PathResolver, DEFAULT_PARENT_ID};
use crate::summary::generate_structure_summary;

/// Storage key of the saved API key.
pub const API_KEY_STORAGE_KEY: &str = "geminiApiKey";

/// Tunables for [`BookmarkAssistant`].
#[derive(Debug, Clone)]
pub struct AssistantSettings {
    pub max_samples_per_folder: usize,
    pub default_parent_id: String,
    pub cache_ttl: Duration,
    pub generation: GenerationSettings,
    /// Used when no key has been saved to storage.
    pub fallback_api_key: Option<String>,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            max_samples_per_folder: DEFAULT_MAX_SAMPLES,
            default_parent_id: DEFAULT_PARENT_ID.to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
            generation: GenerationSettings::default(),
            fallback_api_key: None,
        }
    }
}

pub struct BookmarkAssistant {
    bookmarks: Arc<dyn BookmarkStore>,
    storage: Arc<dyn KeyValueStore>,
    cache: StructureCache,
    recent: RecentFolders,
    resolver: PathResolver,
    client: RecommendationClient,
    max_samples_per_folder: usize,
    fallback_api_key: Option<String>,
    busy: AtomicBool,
}

impl BookmarkAssistant {
    pub fn new(
        bookmarks: Arc<dyn BookmarkStore>,
        storage: Arc<dyn KeyValueStore>,
        model: Arc<dyn RecommendationModel>,
        settings: AssistantSettings,
    ) -> Self {
        Self::with_clock(bookmarks, storage, model, Arc::new(SystemClock), settings)
    }

    pub fn with_clock(
        bookmarks: Arc<dyn BookmarkStore>,
        storage: Arc<dyn KeyValueStore>,
        model: Arc<dyn RecommendationModel>,
        clock: Arc<dyn Clock>,
        settings: AssistantSettings,
    ) -> Self {
        Self {
            cache: StructureCache::new(storage.clone(), clock, settings.cache_ttl),
            recent: RecentFolders::new(storage.clone()),
            resolver: PathResolver::new(bookmarks.clone(), settings.default_parent_id),
            client: RecommendationClient::new(model).with_generation(settings.generation),
            max_samples_per_folder: settings.max_samples_per_folder,
            fallback_api_key: settings.fallback_api_key,
            bookmarks,
            storage,
            busy: AtomicBool::new(false),
        }
    }

    /// Whether a recommendation or creation is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Cached structure, or a fresh analysis of the bookmark tree.
    pub async fn load_structure(&self) -> Result<StructureBundle, AssistantError> {
        if let Some(bundle) = self.cache.read().await {
            return Ok(bundle);
        }
        self.refresh_structure().await
    }

    /// Analyze the current tree and replace the cache entry.
    pub async fn refresh_structure(&self) -> Result<StructureBundle, AssistantError> {
        let tree = self.bookmarks.get_tree().await?;
        let folders = top_level_nodes(tree);

        let (digest, statistics) = analyze(&folders, self.max_samples_per_folder);
        let summary = generate_structure_summary(&statistics);
        let bundle = StructureBundle {
            digest,
            statistics,
            summary,
            tree: folders,
        };

        if let Err(e) = self.cache.write(&bundle).await {
            warn!("Failed to cache bookmark structure: {}", e);
        }
        Ok(bundle)
    }

    /// Look for a bookmark of `url` that already exists.
    pub async fn check_existing(
        &self,
        url: &str,
    ) -> Result<Option<ExistingBookmark>, AssistantError> {
        let bundle = self.load_structure().await?;
        Ok(find_existing(url, &bundle.tree))
    }

    /// Read the page to work on from a [`TabAccessor`].
    pub async fn active_tab(&self, tabs: &dyn TabAccessor) -> Result<Tab, AssistantError> {
        let tab = tabs.current_tab().await?;
        if tab.url.trim().is_empty() {
            return Err(AssistantError::NoActiveTab);
        }
        Ok(tab)
    }

    /// Ask the model where `url` should be filed.
    ///
    /// Failures leave the structure cache untouched.
    pub async fn recommend(&self, url: &str) -> Result<Vec<Recommendation>, AssistantError> {
        let _guard = BusyGuard::acquire(&self.busy)?;

        let api_key = self.api_key().await?.ok_or_else(|| {
            RecommendationError::InvalidApiKey("no API key has been saved".to_string())
        })?;
        let bundle = self.load_structure().await?;

        let recommendations = self
            .client
            .get_recommendations(&api_key, &bundle.digest.markdown, url, &bundle.summary)
            .await?;
        Ok(recommendations)
    }

    /// Create a bookmark at `path`, creating its last folder if `add_folder`.
    pub async fn create(
        &self,
        path: &str,
        title: &str,
        url: &str,
        add_folder: bool,
    ) -> Result<PlacementOutcome, AssistantError> {
        let _guard = BusyGuard::acquire(&self.busy)?;

        let bundle = self.load_structure().await?;
        let outcome = match self
            .resolver
            .create_bookmark_with_path(&bundle.tree, path, title, url, add_folder)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                // A folder created before the failure still changed the tree.
                if e.tree_changed() {
                    self.invalidate_after_mutation().await;
                }
                return Err(e.into());
            }
        };

        self.invalidate_after_mutation().await;
        if let Err(e) = self.recent.record(path).await {
            warn!("Failed to update recent folders: {}", e);
        }

        if outcome.fell_short() {
            info!(
                path,
                parent = %outcome.parent_id,
                "Bookmark placed in the deepest matching folder"
            );
        }
        Ok(outcome)
    }

    async fn invalidate_after_mutation(&self) {
        if let Err(e) = self.cache.invalidate().await {
            warn!("Failed to invalidate structure cache: {}", e);
        }
    }

    /// Apply a recommendation as returned by [`Self::recommend`].
    pub async fn accept(
        &self,
        recommendation: &Recommendation,
        url: &str,
    ) -> Result<PlacementOutcome, AssistantError> {
        self.create(
            &recommendation.text,
            &recommendation.title,
            url,
            recommendation.add_folder,
        )
        .await
    }

    pub async fn recent_folders(&self) -> Vec<String> {
        self.recent.list().await
    }

    /// Drop the cached structure.
    pub async fn invalidate_cache(&self) -> Result<(), AssistantError> {
        self.cache.invalidate().await?;
        Ok(())
    }

    /// The saved API key, or the configured fallback.
    pub async fn api_key(&self) -> Result<Option<String>, AssistantError> {
        let stored = self
            .storage
            .get_one(API_KEY_STORAGE_KEY)
            .await?
            .as_ref()
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string);

        if stored.is_some() {
            return Ok(stored);
        }
        debug!("No saved API key, using configured key if any");
        Ok(self
            .fallback_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| validate_api_key(key))
            .map(str::to_string))
    }

    /// Persist `key` for later sessions.
    pub async fn save_api_key(&self, key: &str) -> Result<(), AssistantError> {
        let key = key.trim();
        if !validate_api_key(key) {
            return Err(RecommendationError::InvalidApiKey("API key is empty".to_string()).into());
        }
        self.storage
            .set_one(API_KEY_STORAGE_KEY, Value::String(key.to_string()))
            .await?;
        info!("Saved API key");
        Ok(())
    }
}

/// Children of the conceptual root, in store order.
fn top_level_nodes(tree: Vec<BookmarkNode>) -> Vec<BookmarkNode> {
    tree.into_iter()
        .flat_map(|root| match root {
            BookmarkNode::Folder { children, .. } => children,
            bookmark @ BookmarkNode::Bookmark { .. } => vec![bookmark],
        })
        .collect()
}

struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, AssistantError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AssistantError::Busy)?;
        Ok(Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
#[path = "assistant_tests.rs"]
mod tests;
