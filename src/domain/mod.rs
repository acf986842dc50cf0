//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (identifiers, timestamps, text helpers)
//! - `feedback` - Comment analysis: extraction, normalization, records, statistics, export

pub mod feedback;
pub mod foundation;
