//! # markwise Config
//!
//! Configuration management for markwise.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationIssue, ValidationResult};
