//! Foundation module - Shared domain primitives.
//!
//! Contains the identifiers, timestamps and small text helpers that the
//! feedback analysis domain is built on.

mod ids;
mod text;
mod timestamp;

pub use ids::CommentId;
pub use text::{truncate_chars, RAW_SNIPPET_LIMIT};
pub use timestamp::Timestamp;
