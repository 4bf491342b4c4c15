//! Errors surfaced by the bookmark assistant.

use thiserror::Error;

use markwise_protocols::{MutationError, RecommendationError, StoreError};

/// Errors returned by [`crate::BookmarkAssistant`].
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Bookmark store error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Mutation(#[from] MutationError),

    #[error(transparent)]
    Recommendation(#[from] RecommendationError),

    #[error("Another request is already in progress")]
    Busy,

    #[error("No active tab")]
    NoActiveTab,
}

impl AssistantError {
    /// Short message suitable for showing to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Store(_) => "Could not read your bookmarks.",
            Self::Mutation(e) => e.user_message(),
            Self::Recommendation(e) => e.user_message(),
            Self::Busy => "Please wait for the current request to finish.",
            Self::NoActiveTab => "No page is open to bookmark.",
        }
    }
}
