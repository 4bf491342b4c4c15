//! Bookmark creation errors.

use thiserror::Error;

use super::StoreError;
use crate::types::NodeId;

#[derive(Debug, Error)]
pub enum MutationError {
    #[error("Failed to create folder '{name}': {source}")]
    FolderCreationFailed {
        name: String,
        #[source]
        source: StoreError,
    },

    #[error("Failed to create bookmark '{title}': {source}")]
    BookmarkCreationFailed {
        title: String,
        /// Folder created earlier in the same placement, left in the tree.
        created_folder: Option<NodeId>,
        #[source]
        source: StoreError,
    },
}

impl MutationError {
    /// Short message safe to show to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::FolderCreationFailed { .. } => "Could not create the new folder.",
            Self::BookmarkCreationFailed { .. } => "Could not create the bookmark.",
        }
    }

    /// Whether the bookmark tree was modified before the failure.
    pub fn tree_changed(&self) -> bool {
        matches!(
            self,
            Self::BookmarkCreationFailed {
                created_folder: Some(_),
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_creation_failed_display() {
        let err = MutationError::FolderCreationFailed {
            name: "Papers".to_string(),
            source: StoreError::NotFound("5".to_string()),
        };
        let display = err.to_string();
        assert!(display.contains("Papers"));
        assert!(display.contains("not found"));
    }

    #[test]
    fn test_user_message_hides_store_detail() {
        let err = MutationError::BookmarkCreationFailed {
            title: "Docs".to_string(),
            created_folder: None,
            source: StoreError::Unavailable("EACCES /home/u/Bookmarks".to_string()),
        };
        assert!(!err.user_message().contains("EACCES"));
    }

    #[test]
    fn test_tree_changed_only_after_folder_creation() {
        let left_folder = MutationError::BookmarkCreationFailed {
            title: "Docs".to_string(),
            created_folder: Some("42".to_string()),
            source: StoreError::Unavailable("disk full".to_string()),
        };
        assert!(left_folder.tree_changed());

        let folder_failed = MutationError::FolderCreationFailed {
            name: "Papers".to_string(),
            source: StoreError::Unavailable("disk full".to_string()),
        };
        assert!(!folder_failed.tree_changed());
    }
}
