//! Comment rows read from an uploaded table.

/// One data line of the uploaded table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRow {
    text: Option<String>,
    original_row_index: i64,
}

impl CommentRow {
    /// Row index of the first data line; line 1 is the header.
    pub const FIRST_DATA_ROW: i64 = 2;

    pub fn new(text: Option<String>, original_row_index: i64) -> Self {
        Self {
            text,
            original_row_index,
        }
    }

    /// Row built from the `position`-th data line (0-based).
    pub fn at_position(text: Option<String>, position: usize) -> Self {
        let index = i64::try_from(position)
            .unwrap_or(i64::MAX - Self::FIRST_DATA_ROW)
            .saturating_add(Self::FIRST_DATA_ROW);
        Self::new(text, index)
    }

    /// Raw comment text, empty when the cell was absent.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn original_row_index(&self) -> i64 {
        self.original_row_index
    }

    /// True when there is nothing to send to the model.
    pub fn is_blank(&self) -> bool {
        is_blank(self.text())
    }
}

/// Empty or whitespace-only text.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_map_past_the_header() {
        assert_eq!(CommentRow::at_position(None, 0).original_row_index(), 2);
        assert_eq!(CommentRow::at_position(None, 9).original_row_index(), 11);
    }

    #[test]
    fn missing_text_is_blank() {
        let row = CommentRow::new(None, 2);
        assert_eq!(row.text(), "");
        assert!(row.is_blank());
    }

    #[test]
    fn whitespace_is_blank() {
        assert!(CommentRow::new(Some(" \t\n".into()), 3).is_blank());
        assert!(!CommentRow::new(Some(" ok ".into()), 3).is_blank());
    }
}
