//! Text helpers shared by the analysis pipeline.

/// Upper bound, in characters, for raw model output and error bodies kept in
/// a stored record.
pub const RAW_SNIPPET_LIMIT: usize = 500;

/// Returns at most `max_chars` characters of `s`, never splitting a UTF-8
/// code point.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_strings_are_unchanged() {
        assert_eq!(truncate_chars("hello", 500), "hello");
        assert_eq!(truncate_chars("", 10), "");
    }

    #[test]
    fn long_strings_are_cut_at_limit() {
        let long = "x".repeat(1200);
        assert_eq!(truncate_chars(&long, RAW_SNIPPET_LIMIT).len(), 500);
    }

    #[test]
    fn multibyte_characters_are_not_split() {
        let s = "ééééé";
        let cut = truncate_chars(s, 3);
        assert_eq!(cut, "ééé");
        assert_eq!(cut.chars().count(), 3);
    }
}
