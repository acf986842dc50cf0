//! Feedback comment analysis domain.
//!
//! Pure logic for turning one raw comment and one raw model response into a
//! stored analysis record, and for deriving statistics and exports from the
//! stored records. Nothing in here performs I/O.
//!
//! # Flow
//!
//! ```text
//! CSV bytes ──parse_comment_rows──► CommentRow
//!                                      │ build_prompt
//!                                      ▼
//!                         model output ──extract──► object ──normalize──► Verdict
//!                                                                           │
//!                      AnalysisOutcome ◄────────────────────────────────────┘
//!                             │ AnalysisRecord::from_outcome
//!                             ▼
//!                      AnalysisRecord ──to_item──► record store
//!                      AnalysisRecord ◄─from_item── record store ──► render_csv
//!                             │
//!                         aggregate
//! ```

mod export;
mod extractor;
mod ingest;
pub mod labels;
mod normalizer;
mod outcome;
mod prompt;
mod record;
mod row;
mod statistics;

pub use export::{render_csv, ExportError, NO_DATA_MESSAGE};
pub use extractor::{extract, ExtractionError};
pub use ingest::{parse_comment_rows, IngestionError, COMMENT_COLUMN};
pub use normalizer::{
    coerce_importance, coerce_integer, coerce_label, coerce_risk, missing_keys, normalize,
    parse_risk_word, Verdict, EXPECTED_KEYS,
};
pub use outcome::AnalysisOutcome;
pub use prompt::{build_prompt, INSTRUCTION};
pub use record::{columns, AnalysisRecord, LlmStatusCode, StoredItem, MISSING_COMMENT_TEXT};
pub use row::{is_blank, CommentRow};
pub use statistics::{
    aggregate, AggregateStatistics, RECOMMENDED_ACTION_THRESHOLD_PERCENT, TOP_IMPORTANCE_CUTOFF,
};
