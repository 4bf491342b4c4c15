//! Gemini recommendation model implementation.

use async_trait::async_trait;
use tracing::debug;

use markwise_protocols::{ModelRequest, RecommendationError, RecommendationModel};

use crate::client::GeminiClient;
use crate::types::*;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const JSON_MIME_TYPE: &str = "application/json";

/// Gemini-backed [`RecommendationModel`].
pub struct GeminiProvider {
    client: GeminiClient,
    model: String,
}

impl GeminiProvider {
    /// Create a provider for `model` on the public endpoint.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: GeminiClient::new(),
            model: model.into(),
        }
    }

    /// Create a provider with a custom API URL.
    pub fn with_url(model: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: GeminiClient::with_base_url(base_url),
            model: model.into(),
        }
    }

    fn build_request(&self, request: &ModelRequest) -> GenerateContentRequest {
        let generation = &request.generation;
        GenerateContentRequest {
            contents: vec![Content::user(request.prompt.clone())],
            system_instruction: Some(Content::system(request.system_instruction.clone())),
            generation_config: Some(GenerationConfig {
                temperature: Some(generation.temperature),
                top_p: Some(generation.top_p),
                top_k: Some(generation.top_k),
                max_output_tokens: Some(generation.max_output_tokens),
                response_mime_type: request
                    .response_schema
                    .as_ref()
                    .map(|_| JSON_MIME_TYPE.to_string()),
                response_schema: request.response_schema.clone(),
            }),
        }
    }
}

impl Default for GeminiProvider {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL)
    }
}

#[async_trait]
impl RecommendationModel for GeminiProvider {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: ModelRequest) -> Result<String, RecommendationError> {
        let body = self.build_request(&request);
        let response = self
            .client
            .generate_content(&request.api_key, &self.model, &body)
            .await?;

        if let Some(usage) = &response.usage_metadata {
            debug!(
                prompt_tokens = usage.prompt_token_count,
                output_tokens = usage.candidates_token_count,
                "Gemini usage"
            );
        }

        if let Some(reason) = response.block_reason() {
            return Err(RecommendationError::Failed(format!(
                "prompt was blocked: {}",
                reason
            )));
        }

        response.text().ok_or_else(|| {
            let finish = response
                .candidates
                .first()
                .and_then(|c| c.finish_reason.as_deref())
                .unwrap_or("none");
            RecommendationError::MalformedResponse(format!(
                "response contained no text (finish reason: {})",
                finish
            ))
        })
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
