//! Mock Model Invoker for testing and local development.
//!
//! Returns queued replies in order and records recent calls. When the queue is
//! empty it answers with a fixed neutral verdict.
//!
//! # Example
//!
//! ```ignore
//! let invoker = MockModelInvoker::new()
//!     .with_response(r#"{"sentiment":"Positive","category":"Other","importance":2,"isHighRisk":false}"#)
//!     .with_error(ModelError::Transport("connection reset".into()));
//!
//! let text = invoker.invoke("mock", "prompt", &GenerationConfig::default()).await?;
//! assert_eq!(invoker.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::ports::{GenerationConfig, ModelError, ModelInvoker};

/// Reply used once the queue is exhausted.
pub const DEFAULT_MOCK_REPLY: &str =
    r#"{"sentiment":"Neutral","category":"Other","importance":1,"isHighRisk":false}"#;

/// Only the most recent calls are kept, so a long-running mock stays bounded.
const MAX_RECORDED_CALLS: usize = 64;

/// Mock model invoker.
#[derive(Debug, Clone, Default)]
pub struct MockModelInvoker {
    /// Pre-configured replies (consumed in order).
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    /// Total number of invocations.
    call_count: Arc<AtomicUsize>,
    /// Most recent calls, oldest first.
    calls: Arc<Mutex<VecDeque<MockCall>>>,
}

/// A configured mock reply.
#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error(ModelError),
}

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct MockCall {
    pub model_id: String,
    pub prompt: String,
    pub config: GenerationConfig,
}

impl MockModelInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a successful reply to the queue.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        lock(&self.replies).push_back(MockReply::Text(text.into()));
        self
    }

    /// Adds an error reply to the queue.
    pub fn with_error(self, error: ModelError) -> Self {
        lock(&self.replies).push_back(MockReply::Error(error));
        self
    }

    /// Returns the number of calls made.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Returns the recorded calls, oldest first.
    pub fn get_calls(&self) -> Vec<MockCall> {
        lock(&self.calls).iter().cloned().collect()
    }

    fn next_reply(&self) -> MockReply {
        lock(&self.replies)
            .pop_front()
            .unwrap_or_else(|| MockReply::Text(DEFAULT_MOCK_REPLY.to_string()))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl ModelInvoker for MockModelInvoker {
    async fn invoke(
        &self,
        model_id: &str,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<String, ModelError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        {
            let mut calls = lock(&self.calls);
            if calls.len() == MAX_RECORDED_CALLS {
                calls.pop_front();
            }
            calls.push_back(MockCall {
                model_id: model_id.to_string(),
                prompt: prompt.to_string(),
                config: *config,
            });
        }

        match self.next_reply() {
            MockReply::Text(text) => Ok(text),
            MockReply::Error(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replies_are_consumed_in_order() {
        let invoker = MockModelInvoker::new()
            .with_response("first")
            .with_error(ModelError::Transport("down".into()));
        let config = GenerationConfig::default();

        assert_eq!(invoker.invoke("m", "p1", &config).await.unwrap(), "first");
        assert!(invoker.invoke("m", "p2", &config).await.is_err());
        assert_eq!(
            invoker.invoke("m", "p3", &config).await.unwrap(),
            DEFAULT_MOCK_REPLY
        );
    }

    #[tokio::test]
    async fn calls_are_recorded() {
        let invoker = MockModelInvoker::new();
        let config = GenerationConfig::default();

        invoker.invoke("titan", "hello", &config).await.unwrap();

        assert_eq!(invoker.call_count(), 1);
        let calls = invoker.get_calls();
        assert_eq!(calls[0].model_id, "titan");
        assert_eq!(calls[0].prompt, "hello");
        assert_eq!(calls[0].config, config);
    }

    #[tokio::test]
    async fn call_history_is_bounded() {
        let invoker = MockModelInvoker::new();
        let config = GenerationConfig::default();

        for i in 0..MAX_RECORDED_CALLS + 10 {
            invoker.invoke("m", &format!("p{i}"), &config).await.unwrap();
        }

        assert_eq!(invoker.call_count(), MAX_RECORDED_CALLS + 10);
        let calls = invoker.get_calls();
        assert_eq!(calls.len(), MAX_RECORDED_CALLS);
        assert_eq!(calls[0].prompt, "p10");
        assert_eq!(
            calls.last().unwrap().prompt,
            format!("p{}", MAX_RECORDED_CALLS + 9)
        );
    }

    #[tokio::test]
    async fn clones_share_state() {
        let invoker = MockModelInvoker::new().with_response("shared");
        let clone = invoker.clone();

        clone
            .invoke("m", "p", &GenerationConfig::default())
            .await
            .unwrap();

        assert_eq!(invoker.call_count(), 1);
    }
}
