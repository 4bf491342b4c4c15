//! Error types for the markwise protocol layer.

mod mutation;
mod recommendation;
mod store;

pub use mutation::*;
pub use recommendation::*;
pub use store::*;
