//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for one analyzed comment.
///
/// Freshly generated identifiers are random v4 UUIDs. Identifiers read back
/// from the record store are kept verbatim, so older items with non-UUID keys
/// still round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(String);

impl CommentId {
    /// Creates a new random CommentId.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an identifier read from storage.
    pub fn from_stored(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight characters, used to keep log lines short.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl Default for CommentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_are_unique_uuids() {
        let a = CommentId::new();
        let b = CommentId::new();

        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn stored_ids_are_kept_verbatim() {
        let id = CommentId::from_stored("legacy-key-1");
        assert_eq!(id.as_str(), "legacy-key-1");
        assert_eq!(id.to_string(), "legacy-key-1");
    }

    #[test]
    fn short_form_is_eight_chars() {
        let id = CommentId::from_stored("0123456789abcdef");
        assert_eq!(id.short(), "01234567");

        let tiny = CommentId::from_stored("abc");
        assert_eq!(tiny.short(), "abc");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = CommentId::from_stored("abc-123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc-123\"");
    }
}
