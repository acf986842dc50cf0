//! Canonical label values and sentinels stored in `Sentiment` / `Category`.
//!
//! The model is asked for one of the listed values, but whatever string it
//! returns is stored as-is; only the sentinels below are produced by this crate.

/// Sentiments the prompt asks the model to choose from.
pub const SENTIMENTS: [&str; 4] = ["Positive", "Negative", "Neutral", "Mixed"];

/// Categories the prompt asks the model to choose from.
pub const CATEGORIES: [&str; 4] = ["Lecture Content", "Lecture Materials", "Operations", "Other"];

/// Label used when the model omitted the field.
pub const UNKNOWN: &str = "Unknown";

/// Label stored when the model call or response extraction failed.
pub const FAILED_ANALYSIS: &str = "Failed Analysis";

/// Label stored for empty or whitespace-only comments.
pub const SKIPPED_EMPTY: &str = "Skipped - Empty";

/// Error text stored on skipped records.
pub const EMPTY_COMMENT_REASON: &str = "Comment was empty or whitespace-only";

/// Model id stored on skipped records, since no model was called.
pub const NO_MODEL: &str = "N/A";
