//! Bookmark store over a Chromium profile's `Bookmarks` file.
//!
//! The file holds a `roots` object whose `bookmark_bar`, `other` and
//! `synced` entries are folders. Nodes carry string ids, a `name` and a
//! `type` of `folder` or `url`. The roots are exposed as the children of a
//! single conceptual root with id `"0"`, which cannot receive new nodes.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

use markwise_protocols::{BookmarkNode, BookmarkStore, CreateDetails, StoreError};

use crate::atomic::write_atomic;

/// Id of the conceptual root above the profile's root folders.
pub const ROOT_ID: &str = "0";

const ROOT_KEYS: [&str; 3] = ["bookmark_bar", "other", "synced"];

/// Microseconds between 1601-01-01 and the Unix epoch.
const WINDOWS_EPOCH_OFFSET_MICROS: i64 = 11_644_473_600_000_000;

/// Reads and extends a Chromium `Bookmarks` JSON file.
///
/// The browser keeps the file open and rewrites it on its own changes, so
/// writes should happen while it is closed.
pub struct ChromiumBookmarkStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ChromiumBookmarkStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<Value, StoreError> {
        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::Unavailable(format!("bookmarks file {:?} does not exist", self.path))
            } else {
                StoreError::Io(e)
            }
        })?;
        let document: Value = serde_json::from_str(&content)?;
        if !document.get("roots").is_some_and(Value::is_object) {
            return Err(StoreError::Serialization(format!(
                "{:?} has no roots object",
                self.path
            )));
        }
        Ok(document)
    }
}

#[async_trait]
impl BookmarkStore for ChromiumBookmarkStore {
    async fn get_tree(&self) -> Result<Vec<BookmarkNode>, StoreError> {
        let document = self.read_document().await?;
        let roots = &document["roots"];

        let children = ROOT_KEYS
            .iter()
            .filter_map(|key| roots.get(*key))
            .filter_map(convert_node)
            .collect();
        debug!("Read bookmark tree from {:?}", self.path);

        Ok(vec![BookmarkNode::folder(ROOT_ID, "", children)])
    }

    async fn create(
        &self,
        parent_id: &str,
        details: CreateDetails,
    ) -> Result<BookmarkNode, StoreError> {
        if parent_id == ROOT_ID {
            return Err(StoreError::InvalidParent(parent_id.to_string()));
        }

        let _guard = self.write_lock.lock().await;
        let mut document = self.read_document().await?;

        let id = (max_id(&document["roots"]) + 1).to_string();
        let now = chrome_timestamp();

        let parent = document
            .get_mut("roots")
            .and_then(Value::as_object_mut)
            .and_then(|roots| {
                roots
                    .values_mut()
                    .find_map(|root| find_node_mut(root, parent_id))
            })
            .ok_or_else(|| StoreError::NotFound(parent_id.to_string()))?;
        if parent.get("type").and_then(Value::as_str) != Some("folder") {
            return Err(StoreError::InvalidParent(parent_id.to_string()));
        }

        let (raw, node) = match &details.url {
            Some(url) => (
                json!({
                    "date_added": now,
                    "date_last_used": "0",
                    "guid": uuid::Uuid::new_v4().to_string(),
                    "id": id,
                    "name": details.title,
                    "type": "url",
                    "url": url,
                }),
                BookmarkNode::bookmark(id.clone(), details.title.clone(), url.clone()),
            ),
            None => (
                json!({
                    "children": [],
                    "date_added": now,
                    "date_last_used": "0",
                    "date_modified": now,
                    "guid": uuid::Uuid::new_v4().to_string(),
                    "id": id,
                    "name": details.title,
                    "type": "folder",
                }),
                BookmarkNode::folder(id.clone(), details.title.clone(), Vec::new()),
            ),
        };

        parent["date_modified"] = Value::String(now.clone());
        match parent.get_mut("children").and_then(Value::as_array_mut) {
            Some(children) => children.push(raw),
            None => parent["children"] = Value::Array(vec![raw]),
        }

        // The browser recomputes the checksum when it next saves.
        document["checksum"] = Value::String(String::new());

        let content = serde_json::to_vec_pretty(&document)?;
        write_atomic(&self.path, &content).await?;
        info!(id = %id, parent = parent_id, "Wrote node to {:?}", self.path);

        Ok(node)
    }
}

fn convert_node(raw: &Value) -> Option<BookmarkNode> {
    let id = raw.get("id").and_then(Value::as_str)?.to_string();
    let title = raw
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    match raw.get("type").and_then(Value::as_str) {
        Some("folder") => {
            let children = raw
                .get("children")
                .and_then(Value::as_array)
                .map(|children| children.iter().filter_map(convert_node).collect())
                .unwrap_or_default();
            Some(BookmarkNode::Folder {
                id,
                title,
                children,
            })
        }
        Some("url") => {
            let url = raw.get("url").and_then(Value::as_str)?.to_string();
            Some(BookmarkNode::Bookmark { id, title, url })
        }
        other => {
            debug!(id = %id, kind = ?other, "Skipping unknown bookmark node type");
            None
        }
    }
}

fn find_node_mut<'a>(node: &'a mut Value, id: &str) -> Option<&'a mut Value> {
    if node.get("id").and_then(Value::as_str) == Some(id) {
        return Some(node);
    }
    node.get_mut("children")?
        .as_array_mut()?
        .iter_mut()
        .find_map(|child| find_node_mut(child, id))
}

/// Largest numeric id anywhere under `value`.
fn max_id(value: &Value) -> u64 {
    match value {
        Value::Object(map) => {
            let own = map
                .get("id")
                .and_then(Value::as_str)
                .and_then(|id| id.parse().ok())
                .unwrap_or(0);
            map.values().map(max_id).fold(own, u64::max)
        }
        Value::Array(items) => items.iter().map(max_id).max().unwrap_or(0),
        _ => 0,
    }
}

fn chrome_timestamp() -> String {
    (Utc::now().timestamp_micros() + WINDOWS_EPOCH_OFFSET_MICROS).to_string()
}

#[cfg(test)]
#[path = "chromium_tests.rs"]
mod tests;
