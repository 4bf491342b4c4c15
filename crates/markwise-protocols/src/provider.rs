//! Recommendation model protocol definitions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RecommendationError;

/// Transport to an external generative model.
///
/// Implementations issue exactly one request per call and never retry.
/// Failures are reported through [`RecommendationError::classify`] or as
/// [`RecommendationError::Network`] for transport errors.
#[async_trait]
pub trait RecommendationModel: Send + Sync {
    /// Returns the model ID.
    fn model(&self) -> &str;

    /// Send one conversation turn and return the raw reply text.
    async fn generate(&self, request: ModelRequest) -> Result<String, RecommendationError>;
}

/// Sampling bounds for a generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 8192,
        }
    }
}

/// A single request to the model.
#[derive(Clone)]
pub struct ModelRequest {
    pub api_key: String,
    pub system_instruction: String,
    pub prompt: String,
    pub generation: GenerationSettings,
    /// JSON schema the reply must follow, if the model supports one.
    pub response_schema: Option<serde_json::Value>,
}

impl std::fmt::Debug for ModelRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRequest")
            .field("api_key", &"<redacted>")
            .field("system_instruction_len", &self.system_instruction.len())
            .field("prompt_len", &self.prompt.len())
            .field("generation", &self.generation)
            .field("response_schema", &self.response_schema.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_defaults() {
        let settings = GenerationSettings::default();
        assert_eq!(settings.temperature, 1.0);
        assert_eq!(settings.top_p, 0.95);
        assert_eq!(settings.top_k, 40);
        assert_eq!(settings.max_output_tokens, 8192);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let request = ModelRequest {
            api_key: "AIza-secret".to_string(),
            system_instruction: "sys".to_string(),
            prompt: "prompt".to_string(),
            generation: GenerationSettings::default(),
            response_schema: None,
        };
        let debug = format!("{:?}", request);
        assert!(!debug.contains("AIza-secret"));
        assert!(debug.contains("redacted"));
    }
}
