//! Model Invoker Port - Interface for the hosted text-generation model.
//!
//! The model is treated as an opaque remote function: a prompt goes in, free
//! text comes out. Interpreting that text is the domain's job.
//!
//! # Example
//!
//! ```ignore
//! let invoker: Arc<dyn ModelInvoker> = Arc::new(BedrockTitanInvoker::new(config)?);
//! let text = invoker
//!     .invoke("amazon.titan-text-express-v1", &prompt, &GenerationConfig::default())
//!     .await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Port for invoking a text-generation model.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    /// Sends `prompt` to `model_id` and returns the generated text.
    async fn invoke(
        &self,
        model_id: &str,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<String, ModelError>;
}

/// Sampling settings for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    /// Kept low so the model sticks to the requested structure.
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_tokens: 500,
            temperature: 0.1,
            top_p: 1.0,
        }
    }
}

/// Errors from model invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The provider answered with an error.
    #[error("Model error: {message}")]
    Model {
        message: String,
        /// HTTP status reported by the provider, when there was one.
        status_code: Option<u16>,
        /// Response body as received.
        raw_body: String,
    },

    /// The request never produced a provider response.
    #[error("Unexpected model call error: {0}")]
    Transport(String),

    /// The provider answered successfully but without generated text.
    #[error("Model output structure unexpected")]
    UnexpectedOutput { raw_body: String },
}

impl ModelError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Model { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// Raw provider body, if any was received.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            Self::Model { raw_body, .. } | Self::UnexpectedOutput { raw_body } => Some(raw_body),
            Self::Transport(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_generation_config_favors_determinism() {
        let config = GenerationConfig::default();
        assert_eq!(config.max_tokens, 500);
        assert!(config.temperature <= 0.1);
        assert_eq!(config.top_p, 1.0);
    }

    #[test]
    fn model_error_exposes_provenance() {
        let err = ModelError::Model {
            message: "Too many requests".into(),
            status_code: Some(429),
            raw_body: "{\"message\":\"Too many requests\"}".into(),
        };

        assert_eq!(err.status_code(), Some(429));
        assert!(err.raw_body().unwrap().contains("Too many"));
        assert_eq!(err.to_string(), "Model error: Too many requests");
    }

    #[test]
    fn transport_error_has_no_body() {
        let err = ModelError::Transport("connection refused".into());
        assert_eq!(err.status_code(), None);
        assert_eq!(err.raw_body(), None);
    }
}
