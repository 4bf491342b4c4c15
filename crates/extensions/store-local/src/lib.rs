//! # markwise Local Stores
//!
//! Durable key-value storage and bookmark stores backed by the local
//! filesystem, plus in-memory variants of both.
//!
//! - [`FileKeyValueStore`] - JSON object file
//! - [`ChromiumBookmarkStore`] - a Chromium profile's `Bookmarks` file
//! - [`MemoryKeyValueStore`] / [`MemoryBookmarkStore`] - for tests and dry runs

mod atomic;
mod chromium;
mod kv;
mod memory;

pub use chromium::ChromiumBookmarkStore;
pub use kv::{FileKeyValueStore, MemoryKeyValueStore};
pub use memory::MemoryBookmarkStore;
