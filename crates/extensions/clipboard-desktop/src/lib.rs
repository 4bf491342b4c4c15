//! # markwise Clipboard - Desktop
//!
//! [`markwise_protocols::Clipboard`] backed by the system clipboard.

mod clipboard;

pub use clipboard::{ClipboardError, SystemClipboard};
