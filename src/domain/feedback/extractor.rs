//! Locates and parses the verdict object inside free-text model output.
//!
//! Models routinely wrap the requested object in prose ("Sure! Here is...")
//! or in a `{"rows": [...]}` container. The extractor takes the span from the
//! first `{` to the last `}`, parses it, and unwraps a `rows` container when
//! its first element is an object.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::foundation::{truncate_chars, RAW_SNIPPET_LIMIT};

/// Key of the wrapper container some models emit around the verdict.
const ROWS_KEY: &str = "rows";

/// Why a verdict object could not be extracted from model output.
///
/// Every variant carries a snippet of the offending text, already truncated
/// to [`RAW_SNIPPET_LIMIT`] characters so it can be stored as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("Could not find JSON object in output text")]
    NoObjectFound { snippet: String },

    #[error("JSON parsing failed: {message}")]
    MalformedObject { message: String, snippet: String },

    #[error("Parsed JSON empty or invalid after unwrapping")]
    EmptyOrInvalidResult { snippet: String },
}

impl ExtractionError {
    /// The truncated text that failed extraction.
    pub fn snippet(&self) -> &str {
        match self {
            Self::NoObjectFound { snippet }
            | Self::MalformedObject { snippet, .. }
            | Self::EmptyOrInvalidResult { snippet } => snippet,
        }
    }
}

/// Extracts the verdict object from raw model output.
pub fn extract(raw: &str) -> Result<Map<String, Value>, ExtractionError> {
    let text = raw.trim();

    let candidate = match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => text[start..=end].trim(),
        _ => {
            return Err(ExtractionError::NoObjectFound {
                snippet: truncate_chars(raw, RAW_SNIPPET_LIMIT),
            })
        }
    };

    let parsed: Value =
        serde_json::from_str(candidate).map_err(|e| ExtractionError::MalformedObject {
            message: e.to_string(),
            snippet: truncate_chars(candidate, RAW_SNIPPET_LIMIT),
        })?;

    match unwrap_rows(parsed) {
        Value::Object(obj) if !obj.is_empty() => Ok(obj),
        _ => Err(ExtractionError::EmptyOrInvalidResult {
            snippet: truncate_chars(candidate, RAW_SNIPPET_LIMIT),
        }),
    }
}

/// Replaces `{"rows": [obj, ...]}` with `obj`; anything else is returned unchanged.
fn unwrap_rows(parsed: Value) -> Value {
    let first_row = match &parsed {
        Value::Object(obj) => match obj.get(ROWS_KEY) {
            Some(Value::Array(rows)) => match rows.first() {
                Some(first @ Value::Object(_)) => Some(first.clone()),
                _ => None,
            },
            _ => None,
        },
        _ => None,
    };
    first_row.unwrap_or(parsed)
}
