//! Language model configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::ports::GenerationConfig;

/// Hosted model provider
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    #[default]
    Bedrock,
    OpenAI,
    /// Canned neutral verdicts, for local runs without credentials
    Mock,
}

/// Language model configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub provider: ModelProvider,

    /// Model identifier passed on every invocation
    #[serde(default)]
    pub model_id: String,

    /// Bedrock bearer key or OpenAI API key
    pub api_key: Option<Secret<String>>,

    #[serde(default = "default_region")]
    pub region: String,

    /// Override for the provider endpoint
    pub endpoint: Option<String>,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ModelConfig {
    /// Sampling parameters sent with every request
    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate model configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.model_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("MODEL__MODEL_ID"));
        }
        if self.provider == ModelProvider::OpenAI && self.api_key.is_none() {
            return Err(ValidationError::MissingRequired("MODEL__API_KEY"));
        }
        if self.max_tokens == 0 {
            return Err(ValidationError::InvalidGenerationSetting("max_tokens"));
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidGenerationSetting("temperature"));
        }
        if !(0.0..=1.0).contains(&self.top_p) || self.top_p == 0.0 {
            return Err(ValidationError::InvalidGenerationSetting("top_p"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: ModelProvider::default(),
            model_id: String::new(),
            api_key: None,
            region: default_region(),
            endpoint: None,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_temperature() -> f32 {
    0.1
}

fn default_top_p() -> f32 {
    1.0
}

fn default_timeout() -> u64 {
    60
}
