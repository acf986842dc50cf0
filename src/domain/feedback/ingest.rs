//! Parsing an uploaded comment table into [`CommentRow`]s.

use thiserror::Error;

use super::row::CommentRow;

/// Header of the column holding the comment text. Matched exactly.
pub const COMMENT_COLUMN: &str = "Comment";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// The uploaded source could not be turned into comment rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestionError {
    #[error("CSV does not contain a '{COMMENT_COLUMN}' column. Found columns: [{}]", found.join(", "))]
    MissingCommentColumn { found: Vec<String> },

    #[error("Error parsing CSV: {message}")]
    Malformed { message: String },

    #[error("Error reading source file: {message}")]
    SourceUnavailable { message: String },
}

impl IngestionError {
    /// Caller-side problems, as opposed to unreadable or broken sources.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingCommentColumn { .. })
    }
}

/// Reads every data row of a CSV document.
///
/// The first line is the header. A leading UTF-8 byte order mark is ignored.
/// Rows shorter than the header yield an empty comment, and blank lines are
/// skipped.
pub fn parse_comment_rows(bytes: &[u8]) -> Result<Vec<CommentRow>, IngestionError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader.headers().map_err(malformed)?.clone();
    let comment_idx = headers
        .iter()
        .position(|h| h == COMMENT_COLUMN)
        .ok_or_else(|| IngestionError::MissingCommentColumn {
            found: headers.iter().map(str::to_string).collect(),
        })?;

    let mut rows = Vec::new();
    for (position, record) in reader.records().enumerate() {
        let record = record.map_err(malformed)?;
        let text = record.get(comment_idx).map(str::to_string);
        rows.push(CommentRow::at_position(text, position));
    }
    Ok(rows)
}

fn malformed(err: csv::Error) -> IngestionError {
    IngestionError::Malformed {
        message: err.to_string(),
    }
}
