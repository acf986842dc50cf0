//! OpenAI Invoker - ModelInvoker for OpenAI-compatible chat completion APIs.
//!
//! The prompt is sent as a single user message and the first choice's
//! content is returned.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new(api_key)
//!     .with_base_url("https://api.openai.com/v1");
//!
//! let invoker = OpenAIInvoker::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::ports::{GenerationConfig, ModelError, ModelInvoker};

/// Configuration for the OpenAI invoker.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl OpenAIConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI chat completions invoker.
pub struct OpenAIInvoker {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIInvoker {
    pub fn new(config: OpenAIConfig) -> Result<Self, ModelError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ModelError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }
}

#[async_trait]
impl ModelInvoker for OpenAIInvoker {
    async fn invoke(
        &self,
        model_id: &str,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<String, ModelError> {
        let request = OpenAIRequest {
            model: model_id,
            messages: vec![OpenAIMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            top_p: config.top_p,
        };

        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ModelError::Transport(format!(
                        "timed out after {}s",
                        self.config.timeout.as_secs()
                    ))
                } else if e.is_connect() {
                    ModelError::Transport(format!("Connection failed: {}", e))
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
                message: error_message(&raw_body)
                    .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
                status_code: Some(status.as_u16()),
                raw_body,
            });
        }

        let parsed: Option<OpenAIResponse> = serde_json::from_str(&raw_body).ok();
        parsed
            .and_then(|r| r.choices.into_iter().next())
            .and_then(|choice| choice.message.content)
            .ok_or(ModelError::UnexpectedOutput { raw_body })
    }
}

/// `error.message` from an OpenAI error body.
fn error_message(raw_body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(raw_body).ok()?;
    parsed
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

// ----- OpenAI API Types -----

#[derive(Debug, Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAIMessage>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::json;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn config_builder_works() {
        let config = OpenAIConfig::new("test-key")
            .with_base_url("https://custom.api.com/")
            .with_timeout(Duration::from_secs(30));

        assert_eq!(config.base_url, "https://custom.api.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.api_key(), "test-key");
    }

    #[tokio::test]
    async fn returns_first_choice_content() {
        let router = Router::new().route(
            "/chat/completions",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["model"], "gpt-4o-mini");
                assert_eq!(body["messages"][0]["role"], "user");
                assert_eq!(body["max_tokens"], 500);
                Json(json!({
                    "choices": [{"message": {"role": "assistant", "content": "{\"importance\": 2}"}}]
                }))
            }),
        );
        let base = serve(router).await;
        let invoker = OpenAIInvoker::new(OpenAIConfig::new("k").with_base_url(base)).unwrap();

        let text = invoker
            .invoke("gpt-4o-mini", "prompt", &GenerationConfig::default())
            .await
            .unwrap();

        assert_eq!(text, "{\"importance\": 2}");
    }

    #[tokio::test]
    async fn error_body_message_is_surfaced() {
        let router = Router::new().route(
            "/chat/completions",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"error": {"message": "Incorrect API key provided"}})),
                )
            }),
        );
        let base = serve(router).await;
        let invoker = OpenAIInvoker::new(OpenAIConfig::new("bad").with_base_url(base)).unwrap();

        let err = invoker
            .invoke("gpt-4o-mini", "prompt", &GenerationConfig::default())
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), Some(401));
        assert_eq!(err.to_string(), "Model error: Incorrect API key provided");
    }
}
