//! Bedrock Titan Invoker - ModelInvoker over the Bedrock runtime REST API.
//!
//! Sends the Titan text-generation body and reads `results[0].outputText`.
//!
//! # Configuration
//!
//! ```ignore
//! let config = BedrockConfig::new("us-east-1")
//!     .with_api_key(api_key)
//!     .with_timeout(Duration::from_secs(60));
//!
//! let invoker = BedrockTitanInvoker::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::ports::{GenerationConfig, ModelError, ModelInvoker};

/// Configuration for the Bedrock invoker.
#[derive(Debug, Clone)]
pub struct BedrockConfig {
    /// Bearer API key. Requests are sent unauthenticated when absent.
    api_key: Option<Secret<String>>,
    /// AWS region used to build the default endpoint.
    pub region: String,
    /// Overrides `https://bedrock-runtime.{region}.amazonaws.com`.
    pub endpoint: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
}

impl BedrockConfig {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            api_key: None,
            region: region.into(),
            endpoint: None,
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(Secret::new(api_key.into()));
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL requests are sent to, without a trailing slash.
    pub fn base_url(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://bedrock-runtime.{}.amazonaws.com", self.region),
        }
    }
}

/// Bedrock runtime invoker for Titan text models.
pub struct BedrockTitanInvoker {
    config: BedrockConfig,
    client: Client,
}

impl BedrockTitanInvoker {
    pub fn new(config: BedrockConfig) -> Result<Self, ModelError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ModelError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    fn invoke_url(&self, model_id: &str) -> String {
        format!(
            "{}/model/{}/invoke",
            self.config.base_url(),
            urlencoding::encode(model_id)
        )
    }
}

#[async_trait]
impl ModelInvoker for BedrockTitanInvoker {
    async fn invoke(
        &self,
        model_id: &str,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<String, ModelError> {
        let body = TitanRequest {
            input_text: prompt,
            text_generation_config: TitanGenerationConfig {
                max_token_count: config.max_tokens,
                temperature: config.temperature,
                top_p: config.top_p,
            },
        };

        let mut request = self
            .client
            .post(self.invoke_url(model_id))
            .header("Accept", "application/json")
            .json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ModelError::Transport(format!(
                    "timed out after {}s",
                    self.config.timeout.as_secs()
                ))
            } else {
                ModelError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        let raw_body = response
            .text()
            .await
            .map_err(|e| ModelError::Transport(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(ModelError::Model {
                message: provider_message(&raw_body)
                    .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
                status_code: Some(status.as_u16()),
                raw_body,
            });
        }

        output_text(&raw_body).ok_or(ModelError::UnexpectedOutput { raw_body })
    }
}

/// `results[0].outputText` of a Titan response body.
fn output_text(raw_body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(raw_body).ok()?;
    parsed
        .get("results")?
        .get(0)?
        .get("outputText")?
        .as_str()
        .map(str::to_string)
}

/// Error message from a Bedrock error body (`message` or `Message`).
fn provider_message(raw_body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(raw_body).ok()?;
    parsed
        .get("message")
        .or_else(|| parsed.get("Message"))?
        .as_str()
        .map(str::to_string)
}

// ----- Titan API Types -----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TitanRequest<'a> {
    input_text: &'a str,
    text_generation_config: TitanGenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TitanGenerationConfig {
    max_token_count: u32,
    temperature: f32,
    top_p: f32,
}
