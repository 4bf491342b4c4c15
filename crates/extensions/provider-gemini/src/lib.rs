//! # markwise Provider - Gemini
//!
//! Google Gemini `generateContent` transport implementing
//! [`markwise_protocols::RecommendationModel`].

mod client;
mod provider;
mod types;

pub use client::{GeminiClient, DEFAULT_BASE_URL};
pub use provider::{GeminiProvider, DEFAULT_MODEL};
pub use types::*;
