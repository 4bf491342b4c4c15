//! Folder path resolution and bookmark placement.

use std::sync::Arc;

use tracing::{debug, info};

use markwise_protocols::{
    BookmarkNode, BookmarkStore, CreateDetails, MutationError, NodeId, PlacementOutcome,
    StoreError,
};

/// Separator between folder names in a recommendation path.
pub const PATH_SEPARATOR: &str = " > ";

/// Parent used when no segment of a path matches.
pub const DEFAULT_PARENT_ID: &str = "1";

/// Where a walk down a folder path stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolution {
    pub parent_id: NodeId,
    /// Number of leading segments that matched a folder.
    pub resolved_depth: usize,
}

/// Split `"A > B > C"` into trimmed, non-empty segments.
pub fn split_path(path: &str) -> Vec<String> {
    path.split(PATH_SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Walk `segments` down from `folders`, stopping at the first miss.
///
/// Matching is exact and case-sensitive against folder titles of the
/// current level.
pub fn find_folder_by_path(
    folders: &[BookmarkNode],
    segments: &[String],
    default_parent: &str,
) -> PathResolution {
    let mut level = folders;
    let mut resolution = PathResolution {
        parent_id: default_parent.to_string(),
        resolved_depth: 0,
    };

    for segment in segments {
        let Some(folder) = level
            .iter()
            .find(|node| node.is_folder() && node.title() == segment)
        else {
            break;
        };
        resolution.parent_id = folder.id().to_string();
        resolution.resolved_depth += 1;
        level = folder.children();
    }

    resolution
}

/// Creates bookmarks at folder paths through a [`BookmarkStore`].
pub struct PathResolver {
    store: Arc<dyn BookmarkStore>,
    default_parent_id: String,
}

impl PathResolver {
    pub fn new(store: Arc<dyn BookmarkStore>, default_parent_id: impl Into<String>) -> Self {
        Self {
            store,
            default_parent_id: default_parent_id.into(),
        }
    }

    pub fn default_parent_id(&self) -> &str {
        &self.default_parent_id
    }

    /// Create a bookmark at `path`, optionally creating its final folder.
    ///
    /// With `should_create_folder` the last segment is always created as a
    /// new folder under the deepest match of the preceding segments.
    /// Otherwise the bookmark lands in the deepest folder that matched.
    pub async fn create_bookmark_with_path(
        &self,
        folders: &[BookmarkNode],
        path: &str,
        title: &str,
        url: &str,
        should_create_folder: bool,
    ) -> Result<PlacementOutcome, MutationError> {
        let segments = split_path(path);
        let requested_depth = segments.len();

        let (parent_id, resolved_depth, created_folder) = if should_create_folder {
            let Some((folder_name, prefix)) = segments.split_last() else {
                return Err(MutationError::FolderCreationFailed {
                    name: String::new(),
                    source: StoreError::NotFound("empty folder path".to_string()),
                });
            };
            let resolution = find_folder_by_path(folders, prefix, &self.default_parent_id);
            if resolution.resolved_depth < prefix.len() {
                debug!(
                    path,
                    resolved = resolution.resolved_depth,
                    requested = prefix.len(),
                    "Parent path only partially matched"
                );
            }

            let folder = self
                .store
                .create(&resolution.parent_id, CreateDetails::folder(folder_name))
                .await
                .map_err(|source| MutationError::FolderCreationFailed {
                    name: folder_name.clone(),
                    source,
                })?;
            info!(
                folder = %folder_name,
                id = folder.id(),
                parent = %resolution.parent_id,
                "Created folder"
            );

            (
                folder.id().to_string(),
                resolution.resolved_depth + 1,
                Some(folder),
            )
        } else {
            let resolution = find_folder_by_path(folders, &segments, &self.default_parent_id);
            if resolution.resolved_depth < requested_depth {
                debug!(
                    path,
                    resolved = resolution.resolved_depth,
                    requested = requested_depth,
                    "Path only partially matched, using deepest folder"
                );
            }
            (resolution.parent_id, resolution.resolved_depth, None)
        };

        let bookmark = self
            .store
            .create(&parent_id, CreateDetails::bookmark(title, url))
            .await
            .map_err(|source| MutationError::BookmarkCreationFailed {
                title: title.to_string(),
                created_folder: created_folder.as_ref().map(|f| f.id().to_string()),
                source,
            })?;
        info!(title, url, parent = %parent_id, "Created bookmark");

        Ok(PlacementOutcome {
            bookmark,
            created_folder,
            parent_id,
            resolved_depth,
            requested_depth,
        })
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
