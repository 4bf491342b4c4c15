//! Shared data types.

mod bookmark;
mod recommendation;
mod tab;

pub use bookmark::*;
pub use recommendation::*;
pub use tab::*;
