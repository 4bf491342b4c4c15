//! Gemini API client.

use reqwest::Client;
use tracing::debug;

use markwise_protocols::RecommendationError;

use crate::types::*;

/// Public Gemini REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini API client.
///
/// The API key travels per request in the `x-goog-api-key` header so it
/// never appears in URLs or transport error messages.
pub struct GeminiClient {
    client: Client,
    base_url: String,
}

impl GeminiClient {
    /// Create a client for the public endpoint.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client for a custom endpoint.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generate content (non-streaming).
    pub async fn generate_content(
        &self,
        api_key: &str,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, RecommendationError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        debug!("Gemini generate_content: model={}", model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| RecommendationError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RecommendationError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<GeminiError>(&body) {
                Ok(e) => e.error.describe(),
                Err(_) => body,
            };
            debug!(status = status.as_u16(), "Gemini request failed: {}", message);
            return Err(RecommendationError::classify(Some(status.as_u16()), message));
        }

        serde_json::from_str(&body).map_err(|e| {
            RecommendationError::MalformedResponse(format!("Failed to parse response: {}", e))
        })
    }
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new()
    }
}
