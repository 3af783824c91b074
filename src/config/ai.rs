//! AI provider and emotion classifier configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::ClassifierPolicy;

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Google Gemini API key
    pub gemini_api_key: Option<String>,

    /// OpenAI API key
    pub openai_api_key: Option<String>,

    /// Anthropic API key
    pub anthropic_api_key: Option<String>,

    /// Provider used for emotion classification
    #[serde(default)]
    pub primary_provider: AiProvider,

    /// Overrides the provider's default model
    pub model: Option<String>,

    /// HTTP request timeout in seconds, per provider call
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Retries inside the provider on rate limits and outages
    #[serde(default = "default_provider_retries")]
    pub provider_max_retries: u32,

    /// Deadline for one classification attempt in seconds
    #[serde(default = "default_classify_timeout")]
    pub classify_timeout_secs: u64,

    /// Classification retries before falling back to default scores
    #[serde(default = "default_classify_retries")]
    pub classify_max_retries: u32,

    /// First classification retry delay in milliseconds
    #[serde(default = "default_classify_backoff")]
    pub classify_backoff_ms: u64,
}

/// AI provider type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    Gemini,
    OpenAI,
    Anthropic,
}

impl AiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// API key of the primary provider, if set and non-empty
    pub fn primary_api_key(&self) -> Option<&str> {
        let key = match self.primary_provider {
            AiProvider::Gemini => &self.gemini_api_key,
            AiProvider::OpenAI => &self.openai_api_key,
            AiProvider::Anthropic => &self.anthropic_api_key,
        };
        key.as_deref().filter(|k| !k.is_empty())
    }

    /// Timeout and retry policy for the classifier adapter
    pub fn classifier_policy(&self) -> ClassifierPolicy {
        ClassifierPolicy::default()
            .with_attempt_timeout(Duration::from_secs(self.classify_timeout_secs))
            .with_max_retries(self.classify_max_retries)
            .with_initial_backoff(Duration::from_millis(self.classify_backoff_ms))
    }

    /// API key of the primary provider, or the variable that must set it
    pub fn required_api_key(&self) -> Result<&str, ValidationError> {
        self.primary_api_key()
            .ok_or(ValidationError::MissingRequired(match self.primary_provider {
                AiProvider::Gemini => "AI__GEMINI_API_KEY",
                AiProvider::OpenAI => "AI__OPENAI_API_KEY",
                AiProvider::Anthropic => "AI__ANTHROPIC_API_KEY",
            }))
    }

    /// Validate AI configuration
    ///
    /// The primary provider's key is required in every environment: days
    /// analyzed without a classifier would be stored with default scores
    /// and never revisited.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.required_api_key()?;
        if self.classify_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err(ValidationError::InvalidClassifierTimeout);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            openai_api_key: None,
            anthropic_api_key: None,
            primary_provider: AiProvider::default(),
            model: None,
            request_timeout_secs: default_request_timeout(),
            provider_max_retries: default_provider_retries(),
            classify_timeout_secs: default_classify_timeout(),
            classify_max_retries: default_classify_retries(),
            classify_backoff_ms: default_classify_backoff(),
        }
    }
}

fn default_request_timeout() -> u64 {
    30
}

fn default_provider_retries() -> u32 {
    2
}

// Covers a provider call including its own retries.
fn default_classify_timeout() -> u64 {
    120
}

fn default_classify_retries() -> u32 {
    1
}

fn default_classify_backoff() -> u64 {
    1000
}
