//! Clipboard operations.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use markwise_protocols::{Clipboard, StoreError};

/// Clipboard errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("Clipboard access failed: {0}")]
    AccessFailed(String),

    #[error("Nothing to copy")]
    EmptyText,
}

impl From<ClipboardError> for StoreError {
    fn from(err: ClipboardError) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// System clipboard.
///
/// The platform clipboard is opened per call on a blocking thread. On X11
/// the copied text is handed to the clipboard manager when the handle
/// closes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }

    /// Set text to clipboard.
    pub fn set_text(text: &str) -> Result<(), ClipboardError> {
        if text.is_empty() {
            return Err(ClipboardError::EmptyText);
        }
        let mut clipboard = open()?;
        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::AccessFailed(e.to_string()))
    }
}

fn open() -> Result<arboard::Clipboard, ClipboardError> {
    arboard::Clipboard::new().map_err(|e| ClipboardError::AccessFailed(e.to_string()))
}

async fn run_blocking<T, F>(f: F) -> Result<T, ClipboardError>
where
    F: FnOnce() -> Result<T, ClipboardError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ClipboardError::AccessFailed(format!("clipboard task failed: {}", e)))?
}

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), StoreError> {
        let owned = text.to_string();
        run_blocking(move || SystemClipboard::set_text(&owned)).await?;
        debug!(len = text.len(), "Copied text to clipboard");
        Ok(())
    }
}
