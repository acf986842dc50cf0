//! CSV rendering of stored analysis items.

use serde_json::Value;
use thiserror::Error;

use super::record::{columns, StoredItem};

/// Placeholder written in the first column when there is nothing to export.
pub const NO_DATA_MESSAGE: &str = "No data to export.";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to finish CSV output: {0}")]
    Flush(String),
}

/// Renders stored items as CSV with the fixed column set, every field quoted.
///
/// Values are written as stored, without the read-side defaults used for
/// statistics: booleans become `True`/`False` and missing values are empty.
/// With no items, the header is followed by one full-width placeholder row.
pub fn render_csv(items: &[StoredItem]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(columns::ALL)?;

    if items.is_empty() {
        writer.write_record(
            std::iter::once(NO_DATA_MESSAGE)
                .chain(std::iter::repeat("").take(columns::ALL.len() - 1)),
        )?;
    }

    for item in items {
        writer.write_record(columns::ALL.iter().map(|column| cell(item.get(*column))))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.error().to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Flush(e.to_string()))
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => python_bool(*b).to_string(),
        Some(other) => other.to_string(),
    }
}

fn python_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}
