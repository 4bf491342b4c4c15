//! Bookmark store protocol definitions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::types::BookmarkNode;

/// The platform service owning the canonical bookmark hierarchy.
#[async_trait]
pub trait BookmarkStore: Send + Sync {
    /// Returns the full forest under one conceptual root.
    async fn get_tree(&self) -> Result<Vec<BookmarkNode>, StoreError>;

    /// Create a node under `parent_id`. Omitting the URL creates a folder.
    async fn create(
        &self,
        parent_id: &str,
        details: CreateDetails,
    ) -> Result<BookmarkNode, StoreError>;
}

/// What to create under a parent folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDetails {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl CreateDetails {
    pub fn folder(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: None,
        }
    }

    pub fn bookmark(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: Some(url.into()),
        }
    }
}
