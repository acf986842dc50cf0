//! CommentAnalyzer - Classifies one comment with the model.
//!
//! Builds the prompt, invokes the model, extracts and normalizes the verdict.
//! Every failure ends up in the returned outcome; nothing here is fatal.

use std::sync::Arc;

use crate::domain::feedback::{
    build_prompt, extract, is_blank, labels, missing_keys, normalize, AnalysisOutcome,
};
use crate::domain::foundation::{truncate_chars, RAW_SNIPPET_LIMIT};
use crate::ports::{GenerationConfig, ModelInvoker};

/// Analyzes single comments against a model.
pub struct CommentAnalyzer {
    invoker: Arc<dyn ModelInvoker>,
    generation: GenerationConfig,
}

impl CommentAnalyzer {
    pub fn new(invoker: Arc<dyn ModelInvoker>, generation: GenerationConfig) -> Self {
        Self {
            invoker,
            generation,
        }
    }

    /// Produces the outcome for one comment.
    ///
    /// Blank comments are skipped before anything else; the model is not called.
    pub async fn analyze(&self, comment: &str, row_index: i64, model_id: &str) -> AnalysisOutcome {
        if is_blank(comment) {
            return AnalysisOutcome::Skipped {
                reason: labels::EMPTY_COMMENT_REASON.to_string(),
            };
        }

        let prompt = build_prompt(comment);
        tracing::debug!(row = row_index, model_id, "invoking model");

        let raw = match self.invoker.invoke(model_id, &prompt, &self.generation).await {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(
                    row = row_index,
                    model_id,
                    status_code = ?err.status_code(),
                    error = %err,
                    "model invocation failed"
                );
                return AnalysisOutcome::ModelInvocationFailed {
                    error: err.to_string(),
                    status_code: err.status_code(),
                    raw_snippet: err.raw_body().map(|b| truncate_chars(b, RAW_SNIPPET_LIMIT)),
                };
            }
        };

        let object = match extract(&raw) {
            Ok(object) => object,
            Err(err) => {
                tracing::warn!(row = row_index, error = %err, "could not extract verdict from model output");
                return AnalysisOutcome::ExtractionFailed {
                    error: err.to_string(),
                    raw_snippet: err.snippet().to_string(),
                };
            }
        };

        let missing = missing_keys(&object);
        if !missing.is_empty() {
            tracing::warn!(row = row_index, ?missing, "model verdict is missing keys, using defaults");
        }

        AnalysisOutcome::Succeeded(normalize(&object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockModelInvoker;
    use crate::domain::feedback::Verdict;
    use crate::ports::ModelError;

    fn analyzer(mock: &MockModelInvoker) -> CommentAnalyzer {
        CommentAnalyzer::new(Arc::new(mock.clone()), GenerationConfig::default())
    }

    #[tokio::test]
    async fn blank_comments_never_reach_the_model() {
        let mock = MockModelInvoker::new();
        let analyzer = analyzer(&mock);

        for text in ["", " ", "\t\n  "] {
            let outcome = analyzer.analyze(text, 2, "titan").await;
            assert_eq!(
                outcome,
                AnalysisOutcome::Skipped {
                    reason: "Comment was empty or whitespace-only".into()
                }
            );
        }
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn valid_verdict_is_normalized() {
        let mock = MockModelInvoker::new().with_response(
            r#"Here you go: {"sentiment":"Negative","category":"Operations","importance":"5","isHighRisk":"yes"}"#,
        );

        let outcome = analyzer(&mock).analyze("Fire exit blocked", 3, "titan").await;

        assert_eq!(
            outcome,
            AnalysisOutcome::Succeeded(Verdict {
                sentiment: "Negative".into(),
                category: "Operations".into(),
                importance: 5,
                is_high_risk: true,
            })
        );
        let calls = mock.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model_id, "titan");
        assert!(calls[0].prompt.ends_with("Comment: Fire exit blocked\n"));
    }

    #[tokio::test]
    async fn model_error_keeps_status_and_truncated_body() {
        let mock = MockModelInvoker::new().with_error(ModelError::Model {
            message: "Throttled".into(),
            status_code: Some(429),
            raw_body: "x".repeat(800),
        });

        let outcome = analyzer(&mock).analyze("hello", 2, "titan").await;

        match outcome {
            AnalysisOutcome::ModelInvocationFailed {
                error,
                status_code,
                raw_snippet,
            } => {
                assert_eq!(error, "Model error: Throttled");
                assert_eq!(status_code, Some(429));
                assert_eq!(raw_snippet.unwrap().len(), 500);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unparseable_output_is_extraction_failure() {
        let mock = MockModelInvoker::new().with_response("I'd rather not say.");

        let outcome = analyzer(&mock).analyze("hello", 2, "titan").await;

        assert_eq!(
            outcome,
            AnalysisOutcome::ExtractionFailed {
                error: "Could not find JSON object in output text".into(),
                raw_snippet: "I'd rather not say.".into(),
            }
        );
    }

    #[tokio::test]
    async fn missing_keys_fall_back_to_defaults() {
        let mock = MockModelInvoker::new().with_response(r#"{"sentiment":"Positive"}"#);

        let outcome = analyzer(&mock).analyze("nice", 2, "titan").await;

        assert_eq!(
            outcome,
            AnalysisOutcome::Succeeded(Verdict {
                sentiment: "Positive".into(),
                category: "Unknown".into(),
                importance: 0,
                is_high_risk: false,
            })
        );
    }
}
