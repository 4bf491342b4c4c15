//! In-memory bookmark store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use markwise_protocols::{BookmarkNode, BookmarkStore, CreateDetails, StoreError};

use crate::chromium::ROOT_ID;

/// Bookmark tree held in memory, shaped like a Chromium profile.
pub struct MemoryBookmarkStore {
    state: RwLock<State>,
}

struct State {
    root: BookmarkNode,
    next_id: u64,
}

impl MemoryBookmarkStore {
    /// Empty "Bookmarks Bar", "Other Bookmarks" and "Mobile Bookmarks".
    pub fn new() -> Self {
        Self::with_folders(vec![
            BookmarkNode::folder("1", "Bookmarks Bar", Vec::new()),
            BookmarkNode::folder("2", "Other Bookmarks", Vec::new()),
            BookmarkNode::folder("3", "Mobile Bookmarks", Vec::new()),
        ])
    }

    /// Use `folders` as the children of the conceptual root.
    ///
    /// New ids continue after the largest numeric id in `folders`.
    pub fn with_folders(folders: Vec<BookmarkNode>) -> Self {
        let root = BookmarkNode::folder(ROOT_ID, "", folders);
        let next_id = max_id(&root) + 1;
        Self {
            state: RwLock::new(State { root, next_id }),
        }
    }
}

impl Default for MemoryBookmarkStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookmarkStore for MemoryBookmarkStore {
    async fn get_tree(&self) -> Result<Vec<BookmarkNode>, StoreError> {
        Ok(vec![self.state.read().await.root.clone()])
    }

    async fn create(
        &self,
        parent_id: &str,
        details: CreateDetails,
    ) -> Result<BookmarkNode, StoreError> {
        if parent_id == ROOT_ID {
            return Err(StoreError::InvalidParent(parent_id.to_string()));
        }

        let mut state = self.state.write().await;
        let id = state.next_id.to_string();

        let node = match details.url {
            Some(url) => BookmarkNode::bookmark(id, details.title, url),
            None => BookmarkNode::folder(id, details.title, Vec::new()),
        };

        match find_mut(&mut state.root, parent_id) {
            Some(BookmarkNode::Folder { children, .. }) => children.push(node.clone()),
            Some(BookmarkNode::Bookmark { .. }) => {
                return Err(StoreError::InvalidParent(parent_id.to_string()));
            }
            None => return Err(StoreError::NotFound(parent_id.to_string())),
        }
        state.next_id += 1;

        Ok(node)
    }
}

fn find_mut<'a>(node: &'a mut BookmarkNode, id: &str) -> Option<&'a mut BookmarkNode> {
    if node.id() == id {
        return Some(node);
    }
    match node {
        BookmarkNode::Folder { children, .. } => {
            children.iter_mut().find_map(|child| find_mut(child, id))
        }
        BookmarkNode::Bookmark { .. } => None,
    }
}

fn max_id(node: &BookmarkNode) -> u64 {
    let own = node.id().parse().unwrap_or(0);
    node.children().iter().map(max_id).fold(own, u64::max)
}
