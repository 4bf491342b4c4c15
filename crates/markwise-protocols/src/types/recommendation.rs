//! Recommendation types.

use serde::{Deserialize, Serialize};

/// A candidate folder placement returned by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// The last segment of `text` has to be created first.
    #[serde(alias = "addFolder")]
    pub add_folder: bool,
    /// Folder path, segments joined by `" > "`.
    pub text: String,
    /// Generated bookmark title.
    pub title: String,
}

impl Recommendation {
    pub fn existing(text: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            add_folder: false,
            text: text.into(),
            title: title.into(),
        }
    }

    pub fn new_folder(text: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            add_folder: true,
            text: text.into(),
            title: title.into(),
        }
    }
}
