//! Recommendation errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error("Invalid API key: {0}")]
    InvalidApiKey(String),

    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to get recommendations: {0}")]
    Failed(String),
}

impl RecommendationError {
    /// Classify a failed model call from its HTTP status (if any) and message.
    pub fn classify(status: Option<u16>, message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();

        if message.contains("API_KEY_INVALID") || message.contains("API key not valid") {
            return Self::InvalidApiKey(message);
        }

        match status {
            Some(401) | Some(403) => Self::InvalidApiKey(message),
            Some(429) => Self::QuotaExceeded(message),
            _ if lower.contains("quota") || message.contains("RESOURCE_EXHAUSTED") => {
                Self::QuotaExceeded(message)
            }
            Some(400) | Some(404) => Self::ModelUnavailable(message),
            None if lower.contains("network") || lower.contains("fetch") => {
                Self::Network(message)
            }
            _ => Self::Failed(message),
        }
    }

    /// Short message safe to show to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidApiKey(_) => "Invalid API key. Please check your Gemini API key.",
            Self::QuotaExceeded(_) => "API quota exceeded. Please check your Gemini account.",
            Self::ModelUnavailable(_) => "The model is not available. Please try again later.",
            Self::Network(_) => "Network error. Please check your internet connection.",
            Self::MalformedResponse(_) => "The AI returned an unexpected response. Please try again.",
            Self::InvalidInput(_) => "Nothing to analyze for this page.",
            Self::Failed(_) => "Failed to get recommendations.",
        }
    }
}

#[cfg(test)]
#[path = "recommendation_tests.rs"]
mod tests;
