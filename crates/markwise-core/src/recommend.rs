//! Recommendation client: one structured model call per request.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use markwise_protocols::{
    GenerationSettings, ModelRequest, Recommendation, RecommendationError, RecommendationModel,
};

use crate::prompt::{build_prompt, response_schema, SYSTEM_INSTRUCTION};

/// Existing-folder recommendations kept per response.
pub const MAX_EXISTING_RECOMMENDATIONS: usize = 5;

/// New-folder recommendations kept per response.
pub const MAX_NEW_FOLDER_RECOMMENDATIONS: usize = 2;

/// Whether `api_key` is worth sending at all.
pub fn validate_api_key(api_key: &str) -> bool {
    !api_key.trim().is_empty()
}

/// Strip a surrounding markdown code fence and whitespace.
pub fn normalize_model_output(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string ("json") on the opening fence line.
    let body = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
    };
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Parse and filter the model's reply.
pub fn parse_recommendations(raw: &str) -> Result<Vec<Recommendation>, RecommendationError> {
    let text = normalize_model_output(raw);
    let value: Value = serde_json::from_str(text).map_err(|e| {
        RecommendationError::MalformedResponse(format!("reply is not valid JSON: {e}"))
    })?;

    let entries = value
        .get("recommendations")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            RecommendationError::MalformedResponse(
                "reply has no recommendations array".to_string(),
            )
        })?;

    let mut existing = 0;
    let mut new_folders = 0;
    let mut recommendations = Vec::new();
    for entry in entries {
        let Some(recommendation) = parse_entry(entry) else {
            debug!(?entry, "Dropping incomplete recommendation");
            continue;
        };
        let slot = if recommendation.add_folder {
            &mut new_folders
        } else {
            &mut existing
        };
        let cap = if recommendation.add_folder {
            MAX_NEW_FOLDER_RECOMMENDATIONS
        } else {
            MAX_EXISTING_RECOMMENDATIONS
        };
        if *slot >= cap {
            debug!(text = %recommendation.text, "Dropping recommendation over the cap");
            continue;
        }
        *slot += 1;
        recommendations.push(recommendation);
    }

    if recommendations.is_empty() {
        return Err(RecommendationError::MalformedResponse(
            "reply contained no valid recommendations".to_string(),
        ));
    }
    Ok(recommendations)
}

fn parse_entry(entry: &Value) -> Option<Recommendation> {
    let add_folder = entry
        .get("add_folder")
        .or_else(|| entry.get("addFolder"))
        .and_then(Value::as_bool)?;
    let text = entry.get("text").and_then(Value::as_str)?.trim();
    let title = entry.get("title").and_then(Value::as_str)?.trim();
    if text.is_empty() || title.is_empty() {
        return None;
    }
    Some(Recommendation {
        add_folder,
        text: text.to_string(),
        title: title.to_string(),
    })
}

/// Sends the digest to a [`RecommendationModel`] and validates the reply.
pub struct RecommendationClient {
    model: Arc<dyn RecommendationModel>,
    generation: GenerationSettings,
}

impl RecommendationClient {
    pub fn new(model: Arc<dyn RecommendationModel>) -> Self {
        Self {
            model,
            generation: GenerationSettings::default(),
        }
    }

    pub fn with_generation(mut self, generation: GenerationSettings) -> Self {
        self.generation = generation;
        self
    }

    pub fn model(&self) -> &str {
        self.model.model()
    }

    /// Ask the model where `url` belongs.
    pub async fn get_recommendations(
        &self,
        api_key: &str,
        folder_digest: &str,
        url: &str,
        structure_summary: &str,
    ) -> Result<Vec<Recommendation>, RecommendationError> {
        if !validate_api_key(api_key) {
            return Err(RecommendationError::InvalidApiKey(
                "API key is required".to_string(),
            ));
        }
        if folder_digest.trim().is_empty() {
            return Err(RecommendationError::InvalidInput(
                "folder structure is required".to_string(),
            ));
        }
        if url.trim().is_empty() {
            return Err(RecommendationError::InvalidInput(
                "URL is required".to_string(),
            ));
        }

        let request = ModelRequest {
            api_key: api_key.trim().to_string(),
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            prompt: build_prompt(url, structure_summary, folder_digest),
            generation: self.generation.clone(),
            response_schema: Some(response_schema()),
        };
        debug!(
            model = self.model.model(),
            url,
            prompt_len = request.prompt.len(),
            "Requesting recommendations"
        );

        let raw = self.model.generate(request).await.inspect_err(|e| {
            warn!(model = self.model.model(), "Recommendation request failed: {}", e);
        })?;

        let recommendations = parse_recommendations(&raw).inspect_err(|e| {
            warn!(reply_len = raw.len(), "Rejected model reply: {}", e);
        })?;
        info!(count = recommendations.len(), url, "Received recommendations");
        Ok(recommendations)
    }
}

#[cfg(test)]
#[path = "recommend_tests.rs"]
mod tests;
