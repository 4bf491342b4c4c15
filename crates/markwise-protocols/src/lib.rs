//! # markwise Protocols
//!
//! Data model and collaborator interfaces for markwise.
//! Contains only definitions - no implementations.
//!
//! ## Core Traits
//!
//! - [`BookmarkStore`] - The platform service owning the bookmark hierarchy
//! - [`KeyValueStore`] - Durable key-value persistence
//! - [`TabAccessor`] - Access to the page currently open
//! - [`RecommendationModel`] - External generative model transport
//! - [`Clipboard`] - System clipboard

pub mod bookmarks;
pub mod clipboard;
pub mod error;
pub mod provider;
pub mod storage;
pub mod tab;
pub mod types;

// Re-export core traits
pub use bookmarks::{BookmarkStore, CreateDetails};
pub use clipboard::Clipboard;
pub use error::{MutationError, RecommendationError, StoreError};
pub use provider::{GenerationSettings, ModelRequest, RecommendationModel};
pub use storage::KeyValueStore;
pub use tab::TabAccessor;
pub use types::*;
