//! Result of analyzing one comment.

use super::normalizer::Verdict;

/// What happened to one comment. A stored record is the serialization of
/// exactly one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// Comment was blank; the model was not called.
    Skipped { reason: String },

    /// The model call itself failed.
    ModelInvocationFailed {
        error: String,
        status_code: Option<u16>,
        raw_snippet: Option<String>,
    },

    /// The model answered but no verdict could be extracted.
    ExtractionFailed { error: String, raw_snippet: String },

    /// A normalized verdict.
    Succeeded(Verdict),
}

impl AnalysisOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    /// Model call or extraction failure.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::ModelInvocationFailed { .. } | Self::ExtractionFailed { .. }
        )
    }
}
