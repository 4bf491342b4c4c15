//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Findings of a validation pass.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: &str, message: impl Into<String>) {
        self.errors.push(ValidationIssue::new(path, message));
    }

    fn warn(&mut self, path: &str, message: impl Into<String>) {
        self.warnings.push(ValidationIssue::new(path, message));
    }

    /// Turn the first error into a [`ConfigError`], or hand back the warnings.
    pub fn into_result(self) -> Result<Vec<ValidationIssue>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(issue) => Err(ConfigError::InvalidValue {
                field: issue.path,
                message: issue.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A problem with one config field, addressed by its dotted path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_gemini(config, &mut result);
        Self::validate_analysis(config, &mut result);
        Self::validate_cache(config, &mut result);
        Self::validate_bookmarks(config, &mut result);

        result
    }

    fn validate_gemini(config: &Config, result: &mut ValidationResult) {
        let gemini = &config.gemini;

        if gemini.api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
            result.warn("gemini.api_key", "API key is not set, save one with `markwise key set`");
        }

        if gemini.model.trim().is_empty() {
            result.error("gemini.model", "Model cannot be empty");
        }

        if url::Url::parse(&gemini.base_url)
            .map(|u| u.scheme() != "http" && u.scheme() != "https")
            .unwrap_or(true)
        {
            result.error("gemini.base_url", "base_url must be an http:// or https:// URL");
        }

        if !(0.0..=2.0).contains(&gemini.temperature) {
            result.error("gemini.temperature", "temperature must be between 0.0 and 2.0");
        }

        if !(0.0..=1.0).contains(&gemini.top_p) {
            result.error("gemini.top_p", "top_p must be between 0.0 and 1.0");
        }

        if gemini.top_k == 0 {
            result.error("gemini.top_k", "top_k must be greater than 0");
        }

        if gemini.max_output_tokens == 0 {
            result.error("gemini.max_output_tokens", "max_output_tokens must be greater than 0");
        }
    }

    fn validate_analysis(config: &Config, result: &mut ValidationResult) {
        if config.analysis.max_samples_per_folder == 0 {
            result.error(
                "analysis.max_samples_per_folder",
                "max_samples_per_folder must be greater than 0",
            );
        }
    }

    fn validate_cache(config: &Config, result: &mut ValidationResult) {
        if config.cache.ttl_seconds == 0 {
            result.error("cache.ttl_seconds", "ttl_seconds must be greater than 0");
        }

        if config.cache.ttl_seconds > 24 * 60 * 60 {
            result.warn(
                "cache.ttl_seconds",
                "ttl_seconds is longer than a day, recommendations may use a stale tree",
            );
        }
    }

    fn validate_bookmarks(config: &Config, result: &mut ValidationResult) {
        if config.bookmarks.default_parent_id.trim().is_empty() {
            result.error("bookmarks.default_parent_id", "default_parent_id cannot be empty");
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
