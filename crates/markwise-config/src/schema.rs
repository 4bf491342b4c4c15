//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gemini: GeminiConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub bookmarks: BookmarksConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

/// Gemini model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Used when no key has been saved to storage.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,

    #[serde(default = "default_top_k")]
    pub top_k: u32,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_temperature() -> f32 {
    1.0
}

fn default_top_p() -> f32 {
    0.95
}

fn default_top_k() -> u32 {
    40
}

fn default_max_output_tokens() -> u32 {
    8192
}

/// Tree analysis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Example bookmarks listed per folder in the digest.
    #[serde(default = "default_max_samples")]
    pub max_samples_per_folder: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_samples_per_folder: default_max_samples(),
        }
    }
}

fn default_max_samples() -> usize {
    5
}

/// Structure cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_ttl")]
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl(),
        }
    }
}

fn default_ttl() -> u64 {
    300
}

/// Bookmark source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarksConfig {
    /// Chromium `Bookmarks` file.
    #[serde(default = "default_bookmarks_file")]
    pub file: PathBuf,

    /// Folder that path resolution starts from.
    #[serde(default = "default_parent_id")]
    pub default_parent_id: String,
}

impl Default for BookmarksConfig {
    fn default() -> Self {
        Self {
            file: default_bookmarks_file(),
            default_parent_id: default_parent_id(),
        }
    }
}

fn default_bookmarks_file() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("google-chrome").join("Default").join("Bookmarks"))
        .unwrap_or_else(|| PathBuf::from("Bookmarks"))
}

fn default_parent_id() -> String {
    "1".to_string()
}

/// Durable key-value storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

fn default_storage_path() -> PathBuf {
    markwise_dir().join("storage.json")
}

/// The `~/.markwise` directory.
pub fn markwise_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".markwise"))
        .unwrap_or_else(|| PathBuf::from(".markwise"))
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
