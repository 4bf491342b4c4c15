//! Adapter types and wiring helpers for markwise.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use markwise_config::{markwise_dir, Config, ConfigError, ConfigLoader, ConfigValidator};
use markwise_core::{AssistantSettings, BookmarkAssistant};
use markwise_protocols::{GenerationSettings, StoreError, Tab, TabAccessor};
use markwise_provider_gemini::GeminiProvider;
use markwise_store_local::{ChromiumBookmarkStore, FileKeyValueStore};

/// Default configuration file path.
pub(crate) fn default_config_path() -> PathBuf {
    markwise_dir().join("config.toml")
}

/// Load and validate the configuration, logging validation warnings.
pub(crate) fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    debug!("Loading config from {}", path.display());

    let config = ConfigLoader::load_or_default(&path)?;
    for warning in ConfigValidator::validate(&config).into_result()? {
        warn!("{}: {}", warning.path, warning.message);
    }
    Ok(config)
}

/// Assistant settings derived from the configuration.
pub(crate) fn assistant_settings(config: &Config) -> AssistantSettings {
    AssistantSettings {
        max_samples_per_folder: config.analysis.max_samples_per_folder,
        default_parent_id: config.bookmarks.default_parent_id.clone(),
        cache_ttl: Duration::from_secs(config.cache.ttl_seconds),
        generation: GenerationSettings {
            temperature: config.gemini.temperature,
            top_p: config.gemini.top_p,
            top_k: config.gemini.top_k,
            max_output_tokens: config.gemini.max_output_tokens,
        },
        fallback_api_key: config.gemini.api_key.clone(),
    }
}

/// Wire the Chromium bookmark file, file storage and Gemini transport
/// into an assistant.
pub(crate) fn build_assistant(config: &Config) -> BookmarkAssistant {
    let bookmarks = Arc::new(ChromiumBookmarkStore::new(config.bookmarks.file.clone()));
    let storage = Arc::new(FileKeyValueStore::new(config.storage.path.clone()));
    let model = Arc::new(GeminiProvider::with_url(
        config.gemini.model.clone(),
        config.gemini.base_url.clone(),
    ));
    BookmarkAssistant::new(bookmarks, storage, model, assistant_settings(config))
}

/// Adapter: a tab described by command-line arguments.
pub(crate) struct StaticTab {
    tab: Tab,
}

impl StaticTab {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            tab: Tab::new(url, title),
        }
    }
}

#[async_trait]
impl TabAccessor for StaticTab {
    async fn current_tab(&self) -> Result<Tab, StoreError> {
        Ok(self.tab.clone())
    }
}

/// Show the first and last four characters of a key.
pub(crate) fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}{}", head, "*".repeat(chars.len() - 8), tail)
}
