//! # markwise Core
//!
//! Bookmark tree analysis, structure caching, duplicate detection, folder
//! path resolution and the recommendation pipeline.
//!
//! [`BookmarkAssistant`] ties these together over the collaborator traits of
//! `markwise-protocols`.

pub mod analyzer;
pub mod assistant;
pub mod cache;
pub mod clock;
pub mod duplicate;
pub mod error;
pub mod prompt;
pub mod recent;
pub mod recommend;
pub mod resolver;
pub mod summary;

#[cfg(test)]
mod test_support;

pub use analyzer::{analyze, FolderDigest, FolderStat, StructureStatistics};
pub use assistant::{AssistantSettings, BookmarkAssistant, API_KEY_STORAGE_KEY};
pub use cache::{StructureBundle, StructureCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use duplicate::find_existing;
pub use error::AssistantError;
pub use recent::RecentFolders;
pub use recommend::{normalize_model_output, validate_api_key, RecommendationClient};
pub use resolver::{find_folder_by_path, split_path, PathResolution, PathResolver};
pub use summary::generate_structure_summary;
