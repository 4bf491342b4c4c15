//! Bookmark tree types.

use serde::{Deserialize, Serialize};

/// Opaque node identifier assigned by the bookmark store.
pub type NodeId = String;

/// A node in the bookmark hierarchy.
///
/// A node is either a folder with children or a bookmark with a URL, never
/// both. The serialized form follows the platform shape, where the presence
/// of `children` or `url` decides which one a node is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BookmarkNode {
    Folder {
        id: NodeId,
        #[serde(default)]
        title: String,
        children: Vec<BookmarkNode>,
    },
    Bookmark {
        id: NodeId,
        #[serde(default)]
        title: String,
        url: String,
    },
}

impl BookmarkNode {
    pub fn folder(
        id: impl Into<NodeId>,
        title: impl Into<String>,
        children: Vec<BookmarkNode>,
    ) -> Self {
        Self::Folder {
            id: id.into(),
            title: title.into(),
            children,
        }
    }

    pub fn bookmark(
        id: impl Into<NodeId>,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::Bookmark {
            id: id.into(),
            title: title.into(),
            url: url.into(),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Folder { id, .. } | Self::Bookmark { id, .. } => id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Folder { title, .. } | Self::Bookmark { title, .. } => title,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Bookmark { url, .. } => Some(url),
            Self::Folder { .. } => None,
        }
    }

    /// Children of a folder; empty for bookmarks.
    pub fn children(&self) -> &[BookmarkNode] {
        match self {
            Self::Folder { children, .. } => children,
            Self::Bookmark { .. } => &[],
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder { .. })
    }
}

/// A bookmark that already exists for a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingBookmark {
    pub title: String,
    /// `" > "`-joined ancestor folder titles, or `"Root"`.
    pub path: String,
    pub id: NodeId,
}

/// Result of placing a bookmark under a folder path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementOutcome {
    pub bookmark: BookmarkNode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_folder: Option<BookmarkNode>,
    /// Folder the bookmark was created in.
    pub parent_id: NodeId,
    /// Number of path segments matched against existing folders.
    pub resolved_depth: usize,
    /// Number of path segments that had to match existing folders.
    pub requested_depth: usize,
}

impl PlacementOutcome {
    /// Whether resolution stopped before reaching the requested folder.
    pub fn fell_short(&self) -> bool {
        self.resolved_depth < self.requested_depth
    }
}

#[cfg(test)]
#[path = "bookmark_tests.rs"]
mod tests;
