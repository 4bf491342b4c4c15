//! Collaborator doubles shared by the unit tests.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use tokio::sync::Notify;

use markwise_protocols::{
    BookmarkNode, BookmarkStore, CreateDetails, KeyValueStore, ModelRequest,
    RecommendationError, RecommendationModel, StoreError,
};
use markwise_store_local::MemoryBookmarkStore;

/// Root folders shaped like a Chromium profile.
pub fn sample_folders() -> Vec<BookmarkNode> {
    vec![
        BookmarkNode::folder(
            "1",
            "Bookmarks Bar",
            vec![BookmarkNode::folder(
                "10",
                "Tech",
                vec![
                    BookmarkNode::folder(
                        "11",
                        "AI",
                        vec![BookmarkNode::bookmark(
                            "12",
                            "Attention Is All You Need",
                            "https://arxiv.org/abs/1706.03762",
                        )],
                    ),
                    BookmarkNode::bookmark("13", "Rust", "https://www.rust-lang.org/"),
                ],
            )],
        ),
        BookmarkNode::folder("2", "Other Bookmarks", vec![]),
    ]
}

/// Memory store seeded with [`sample_folders`].
pub fn sample_store() -> Arc<MemoryBookmarkStore> {
    Arc::new(MemoryBookmarkStore::with_folders(sample_folders()))
}

/// Key-value store whose every call fails.
pub struct FailingKeyValueStore;

#[async_trait]
impl KeyValueStore for FailingKeyValueStore {
    async fn get(&self, _keys: &[&str]) -> Result<Map<String, Value>, StoreError> {
        Err(StoreError::Unavailable("storage offline".to_string()))
    }

    async fn set(&self, _items: Map<String, Value>) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("storage offline".to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("storage offline".to_string()))
    }
}

/// Which kind of node a [`RejectingBookmarkStore`] refuses to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reject {
    Folders,
    Bookmarks,
}

/// Delegates to a memory store but rejects one kind of creation.
pub struct RejectingBookmarkStore {
    pub inner: Arc<MemoryBookmarkStore>,
    pub reject: Reject,
}

#[async_trait]
impl BookmarkStore for RejectingBookmarkStore {
    async fn get_tree(&self) -> Result<Vec<BookmarkNode>, StoreError> {
        self.inner.get_tree().await
    }

    async fn create(
        &self,
        parent_id: &str,
        details: CreateDetails,
    ) -> Result<BookmarkNode, StoreError> {
        let is_folder = details.url.is_none();
        match (self.reject, is_folder) {
            (Reject::Folders, true) | (Reject::Bookmarks, false) => {
                Err(StoreError::Unavailable("quota exceeded".to_string()))
            }
            _ => self.inner.create(parent_id, details).await,
        }
    }
}

/// Model double that replays queued replies and records requests.
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, RecommendationError>>>,
    requests: Mutex<Vec<ModelRequest>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedModel {
    pub fn replying(reply: impl Into<String>) -> Self {
        let model = Self::default();
        model.push(Ok(reply.into()));
        model
    }

    pub fn failing(error: RecommendationError) -> Self {
        let model = Self::default();
        model.push(Err(error));
        model
    }

    /// Block every `generate` call until `gate` is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn push(&self, reply: Result<String, RecommendationError>) {
        self.replies.lock().push_back(reply);
    }

    pub fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl RecommendationModel for ScriptedModel {
    fn model(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, request: ModelRequest) -> Result<String, RecommendationError> {
        self.requests.lock().push(request);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(RecommendationError::Failed("no scripted reply".to_string())))
    }
}

pub const GOOD_REPLY: &str = r#"{"recommendations":[
    {"add_folder": false, "text": "Bookmarks Bar > Tech > AI", "title": "Transformer Paper"},
    {"add_folder": true, "text": "Bookmarks Bar > Tech > AI > Papers", "title": "Attention Paper"}
]}"#;
