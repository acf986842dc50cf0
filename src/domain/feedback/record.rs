//! Analysis record: the unit of storage, statistics and export.
//!
//! Records are stored as flat items keyed by the column names in [`columns`].
//! Reading an item back goes through the same coercions as normalizing a
//! fresh verdict, so a record survives a store round trip unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::labels::{FAILED_ANALYSIS, NO_MODEL, SKIPPED_EMPTY};
use super::normalizer::{coerce_importance, coerce_integer, coerce_label, coerce_risk};
use super::outcome::AnalysisOutcome;
use super::row::CommentRow;
use crate::domain::foundation::{CommentId, Timestamp};

/// A stored record as the record store sees it: a flat, loosely-typed item.
pub type StoredItem = Map<String, Value>;

/// Column names of a stored item, in export order.
pub mod columns {
    pub const COMMENT_ID: &str = "CommentID";
    pub const ORIGINAL_COMMENT: &str = "OriginalComment";
    pub const PROCESSING_TIMESTAMP: &str = "ProcessingTimestamp";
    pub const ORIGINAL_CSV_ROW_INDEX: &str = "OriginalCsvRowIndex";
    pub const SENTIMENT: &str = "Sentiment";
    pub const CATEGORY: &str = "Category";
    pub const IMPORTANCE: &str = "Importance";
    pub const IS_HIGH_RISK: &str = "IsHighRisk";
    pub const MODEL_ID: &str = "BedrockModelId";
    pub const LLM_ERROR: &str = "LLMError";
    pub const LLM_RAW_RESPONSE_SNIPPET: &str = "LLMRawResponseSnippet";
    pub const LLM_STATUS_CODE: &str = "LLMStatusCode";

    pub const ALL: [&str; 12] = [
        COMMENT_ID,
        ORIGINAL_COMMENT,
        PROCESSING_TIMESTAMP,
        ORIGINAL_CSV_ROW_INDEX,
        SENTIMENT,
        CATEGORY,
        IMPORTANCE,
        IS_HIGH_RISK,
        MODEL_ID,
        LLM_ERROR,
        LLM_RAW_RESPONSE_SNIPPET,
        LLM_STATUS_CODE,
    ];
}

/// Shown when a stored item has no comment text.
pub const MISSING_COMMENT_TEXT: &str = "No Comment Text";

/// Status code recorded for a failed model call: numeric when the provider
/// reported one, otherwise whatever text was stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LlmStatusCode {
    Code(i64),
    Text(String),
}

impl LlmStatusCode {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Number(n) => n.as_i64().map(Self::Code).or_else(|| Some(Self::Text(n.to_string()))),
            Value::String(s) => Some(
                s.trim()
                    .parse::<i64>()
                    .map(Self::Code)
                    .unwrap_or_else(|_| Self::Text(s.clone())),
            ),
            other => Some(Self::Text(other.to_string())),
        }
    }
}

impl std::fmt::Display for LlmStatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{code}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// One analyzed comment, immutable once built.
///
/// Either the verdict fields are populated and every error field is absent,
/// or sentiment and category hold a sentinel, importance is 0, the risk flag
/// is false and `llm_error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRecord {
    #[serde(rename = "CommentID")]
    comment_id: CommentId,
    #[serde(rename = "OriginalComment")]
    original_comment: String,
    #[serde(rename = "ProcessingTimestamp", skip_serializing_if = "Option::is_none")]
    processing_timestamp: Option<String>,
    #[serde(rename = "OriginalCsvRowIndex")]
    original_csv_row_index: i64,
    #[serde(rename = "Sentiment")]
    sentiment: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Importance")]
    importance: i64,
    #[serde(rename = "IsHighRisk")]
    is_high_risk: bool,
    #[serde(rename = "BedrockModelId")]
    model_id: String,
    #[serde(rename = "LLMError", skip_serializing_if = "Option::is_none")]
    llm_error: Option<String>,
    #[serde(rename = "LLMRawResponseSnippet", skip_serializing_if = "Option::is_none")]
    llm_raw_response_snippet: Option<String>,
    #[serde(rename = "LLMStatusCode", skip_serializing_if = "Option::is_none")]
    llm_status_code: Option<LlmStatusCode>,
}

impl AnalysisRecord {
    /// Builds the record for a freshly analyzed row, with a new id and the
    /// current time.
    ///
    /// `model_id` is the model that was attempted; skipped rows record
    /// `"N/A"` since no model was called.
    pub fn from_outcome(row: &CommentRow, model_id: &str, outcome: &AnalysisOutcome) -> Self {
        let mut record = Self {
            comment_id: CommentId::new(),
            original_comment: row.text().to_string(),
            processing_timestamp: Some(Timestamp::now().to_rfc3339()),
            original_csv_row_index: row.original_row_index(),
            sentiment: FAILED_ANALYSIS.to_string(),
            category: FAILED_ANALYSIS.to_string(),
            importance: 0,
            is_high_risk: false,
            model_id: model_id.to_string(),
            llm_error: None,
            llm_raw_response_snippet: None,
            llm_status_code: None,
        };

        match outcome {
            AnalysisOutcome::Skipped { reason } => {
                record.sentiment = SKIPPED_EMPTY.to_string();
                record.category = SKIPPED_EMPTY.to_string();
                record.model_id = NO_MODEL.to_string();
                record.llm_error = Some(reason.clone());
            }
            AnalysisOutcome::ModelInvocationFailed {
                error,
                status_code,
                raw_snippet,
            } => {
                record.llm_error = Some(error.clone());
                record.llm_raw_response_snippet = raw_snippet.clone();
                record.llm_status_code = status_code.map(|code| LlmStatusCode::Code(code.into()));
            }
            AnalysisOutcome::ExtractionFailed { error, raw_snippet } => {
                record.llm_error = Some(error.clone());
                record.llm_raw_response_snippet = Some(raw_snippet.clone());
            }
            AnalysisOutcome::Succeeded(verdict) => {
                record.sentiment = verdict.sentiment.clone();
                record.category = verdict.category.clone();
                record.importance = verdict.importance;
                record.is_high_risk = verdict.is_high_risk;
            }
        }

        record
    }

    /// Reads a stored item, applying the same coercions as the write path.
    ///
    /// Missing values fall back to display defaults: `"No Comment Text"`,
    /// `"N/A"` for the model, `"Unknown"` for labels and `0` for integers.
    pub fn from_item(item: &StoredItem) -> Self {
        Self {
            comment_id: CommentId::from_stored(text_or(item.get(columns::COMMENT_ID), "")),
            original_comment: text_or(item.get(columns::ORIGINAL_COMMENT), MISSING_COMMENT_TEXT),
            processing_timestamp: optional_text(item.get(columns::PROCESSING_TIMESTAMP))
                .map(|raw| Timestamp::parse(&raw).map(|ts| ts.to_rfc3339()).unwrap_or(raw)),
            original_csv_row_index: coerce_integer(item.get(columns::ORIGINAL_CSV_ROW_INDEX)),
            sentiment: coerce_label(item.get(columns::SENTIMENT)),
            category: coerce_label(item.get(columns::CATEGORY)),
            importance: coerce_importance(item.get(columns::IMPORTANCE)),
            is_high_risk: coerce_risk(item.get(columns::IS_HIGH_RISK)),
            model_id: text_or(item.get(columns::MODEL_ID), NO_MODEL),
            llm_error: optional_text(item.get(columns::LLM_ERROR)),
            llm_raw_response_snippet: optional_text(item.get(columns::LLM_RAW_RESPONSE_SNIPPET)),
            llm_status_code: item
                .get(columns::LLM_STATUS_CODE)
                .and_then(LlmStatusCode::from_value),
        }
    }

    /// Flat item for the record store. Absent optional fields are omitted.
    pub fn to_item(&self) -> StoredItem {
        let mut item = Map::new();
        item.insert(columns::COMMENT_ID.into(), Value::from(self.comment_id.as_str()));
        item.insert(columns::ORIGINAL_COMMENT.into(), Value::from(self.original_comment.as_str()));
        if let Some(ts) = &self.processing_timestamp {
            item.insert(columns::PROCESSING_TIMESTAMP.into(), Value::from(ts.as_str()));
        }
        item.insert(columns::ORIGINAL_CSV_ROW_INDEX.into(), Value::from(self.original_csv_row_index));
        item.insert(columns::SENTIMENT.into(), Value::from(self.sentiment.as_str()));
        item.insert(columns::CATEGORY.into(), Value::from(self.category.as_str()));
        item.insert(columns::IMPORTANCE.into(), Value::from(self.importance));
        item.insert(columns::IS_HIGH_RISK.into(), Value::from(self.is_high_risk));
        item.insert(columns::MODEL_ID.into(), Value::from(self.model_id.as_str()));
        if let Some(error) = &self.llm_error {
            item.insert(columns::LLM_ERROR.into(), Value::from(error.as_str()));
        }
        if let Some(snippet) = &self.llm_raw_response_snippet {
            item.insert(columns::LLM_RAW_RESPONSE_SNIPPET.into(), Value::from(snippet.as_str()));
        }
        match &self.llm_status_code {
            Some(LlmStatusCode::Code(code)) => {
                item.insert(columns::LLM_STATUS_CODE.into(), Value::from(*code));
            }
            Some(LlmStatusCode::Text(text)) => {
                item.insert(columns::LLM_STATUS_CODE.into(), Value::from(text.as_str()));
            }
            None => {}
        }
        item
    }

    pub fn comment_id(&self) -> &CommentId {
        &self.comment_id
    }

    pub fn original_comment(&self) -> &str {
        &self.original_comment
    }

    pub fn processing_timestamp(&self) -> Option<&str> {
        self.processing_timestamp.as_deref()
    }

    pub fn original_csv_row_index(&self) -> i64 {
        self.original_csv_row_index
    }

    pub fn sentiment(&self) -> &str {
        &self.sentiment
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn importance(&self) -> i64 {
        self.importance
    }

    pub fn is_high_risk(&self) -> bool {
        self.is_high_risk
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn llm_error(&self) -> Option<&str> {
        self.llm_error.as_deref()
    }

    pub fn llm_raw_response_snippet(&self) -> Option<&str> {
        self.llm_raw_response_snippet.as_deref()
    }

    pub fn llm_status_code(&self) -> Option<&LlmStatusCode> {
        self.llm_status_code.as_ref()
    }

    /// True for rows that were skipped as blank.
    pub fn is_skipped(&self) -> bool {
        self.sentiment == SKIPPED_EMPTY
    }
}

fn text_or(value: Option<&Value>, default: &str) -> String {
    optional_text(value).unwrap_or_else(|| default.to_string())
}

fn optional_text(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feedback::normalizer::Verdict;
    use serde_json::json;

    fn row(text: &str) -> CommentRow {
        CommentRow::new(Some(text.to_string()), 7)
    }

    fn succeeded() -> AnalysisOutcome {
        AnalysisOutcome::Succeeded(Verdict {
            sentiment: "Negative".into(),
            category: "Operations".into(),
            importance: 5,
            is_high_risk: true,
        })
    }

    #[test]
    fn success_record_has_no_error_fields() {
        let record = AnalysisRecord::from_outcome(&row("Room too cold"), "titan", &succeeded());

        assert_eq!(record.sentiment(), "Negative");
        assert_eq!(record.category(), "Operations");
        assert_eq!(record.importance(), 5);
        assert!(record.is_high_risk());
        assert_eq!(record.model_id(), "titan");
        assert_eq!(record.original_csv_row_index(), 7);
        assert!(record.llm_error().is_none());
        assert!(record.llm_raw_response_snippet().is_none());
        assert!(record.llm_status_code().is_none());
    }

    #[test]
    fn skipped_record_uses_sentinels() {
        let outcome = AnalysisOutcome::Skipped {
            reason: "Comment was empty or whitespace-only".into(),
        };
        let record = AnalysisRecord::from_outcome(&row("  "), "titan", &outcome);

        assert_eq!(record.sentiment(), "Skipped - Empty");
        assert_eq!(record.category(), "Skipped - Empty");
        assert_eq!(record.importance(), 0);
        assert!(!record.is_high_risk());
        assert_eq!(record.model_id(), "N/A");
        assert_eq!(record.llm_error(), Some("Comment was empty or whitespace-only"));
        assert!(record.is_skipped());
    }

    #[test]
    fn model_failure_keeps_provenance() {
        let outcome = AnalysisOutcome::ModelInvocationFailed {
            error: "Model error: throttled".into(),
            status_code: Some(429),
            raw_snippet: Some("{\"message\":\"throttled\"}".into()),
        };
        let record = AnalysisRecord::from_outcome(&row("hi"), "titan", &outcome);

        assert_eq!(record.sentiment(), "Failed Analysis");
        assert_eq!(record.category(), "Failed Analysis");
        assert_eq!(record.importance(), 0);
        assert!(!record.is_high_risk());
        assert_eq!(record.model_id(), "titan");
        assert_eq!(record.llm_status_code(), Some(&LlmStatusCode::Code(429)));
        assert!(record.llm_raw_response_snippet().is_some());
    }

    #[test]
    fn item_omits_absent_optionals() {
        let record = AnalysisRecord::from_outcome(&row("ok"), "titan", &succeeded());
        let item = record.to_item();

        assert!(!item.contains_key(columns::LLM_ERROR));
        assert!(!item.contains_key(columns::LLM_STATUS_CODE));
        assert_eq!(item.get(columns::IS_HIGH_RISK), Some(&json!(true)));
        assert_eq!(item.get(columns::IMPORTANCE), Some(&json!(5)));
    }

    #[test]
    fn store_roundtrip_preserves_record() {
        let outcomes = [
            succeeded(),
            AnalysisOutcome::Skipped { reason: "empty".into() },
            AnalysisOutcome::ExtractionFailed {
                error: "bad".into(),
                raw_snippet: "no json here".into(),
            },
        ];
        for outcome in &outcomes {
            let record = AnalysisRecord::from_outcome(&row("text"), "titan", outcome);
            assert_eq!(AnalysisRecord::from_item(&record.to_item()), record);
        }
    }

    #[test]
    fn loosely_typed_item_is_coerced() {
        let item = json!({
            "CommentID": "abc",
            "OriginalCsvRowIndex": "12",
            "Sentiment": "Positive",
            "Importance": "4",
            "IsHighRisk": "Yes",
            "LLMStatusCode": "Throttled"
        });
        let record = AnalysisRecord::from_item(item.as_object().unwrap());

        assert_eq!(record.comment_id().as_str(), "abc");
        assert_eq!(record.original_comment(), "No Comment Text");
        assert_eq!(record.original_csv_row_index(), 12);
        assert_eq!(record.category(), "Unknown");
        assert_eq!(record.importance(), 4);
        assert!(record.is_high_risk());
        assert_eq!(record.model_id(), "N/A");
        assert_eq!(record.llm_status_code(), Some(&LlmStatusCode::Text("Throttled".into())));
    }

    #[test]
    fn naive_timestamps_are_read_as_utc() {
        let item = json!({"ProcessingTimestamp": "2024-05-01T09:15:00.250000"});
        let record = AnalysisRecord::from_item(item.as_object().unwrap());
        assert_eq!(record.processing_timestamp(), Some("2024-05-01T09:15:00.250000Z"));
    }

    #[test]
    fn serializes_with_stored_column_names() {
        let record = AnalysisRecord::from_outcome(&row("ok"), "titan", &succeeded());
        let value = serde_json::to_value(&record).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(Value::Object(obj.clone()), Value::Object(record.to_item()));
    }
}
