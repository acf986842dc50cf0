//! Aggregate statistics over stored analysis records.
//!
//! Skipped rows count toward `total_comments` only. Every other figure,
//! including the percentages, is computed over the processable records.

use std::collections::BTreeMap;

use serde::Serialize;

use super::record::AnalysisRecord;

/// A category is flagged for action when its share of processable comments
/// is strictly above this percentage.
pub const RECOMMENDED_ACTION_THRESHOLD_PERCENT: f64 = 5.0;

/// Minimum importance for the top-important list.
pub const TOP_IMPORTANCE_CUTOFF: i64 = 4;

/// Distribution, risk and ranking figures derived from the stored records.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AggregateStatistics {
    pub total_comments: usize,
    pub total_processable_comments: usize,
    pub sentiment_counts: BTreeMap<String, usize>,
    pub sentiment_percentages: BTreeMap<String, f64>,
    pub category_counts: BTreeMap<String, usize>,
    pub category_percentages: BTreeMap<String, f64>,
    pub high_risk_count: usize,
    pub recommended_actions: BTreeMap<String, bool>,
    pub top_important_comments: Vec<AnalysisRecord>,
    pub high_risk_comments_list: Vec<AnalysisRecord>,
    pub all_mapped_comments_list: Vec<AnalysisRecord>,
}

impl AggregateStatistics {
    /// The all-zero structure returned when nothing is processable.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Computes statistics over `records`, given in scan order.
///
/// When no record is processable (none stored, or all skipped) the result is
/// [`AggregateStatistics::empty`].
pub fn aggregate(records: &[AnalysisRecord]) -> AggregateStatistics {
    let processable: Vec<AnalysisRecord> =
        records.iter().filter(|r| !r.is_skipped()).cloned().collect();

    if processable.is_empty() {
        return AggregateStatistics::empty();
    }

    let total = processable.len();
    let sentiment_counts = count_by(&processable, |r| r.sentiment());
    let category_counts = count_by(&processable, |r| r.category());
    let sentiment_percentages = percentages(&sentiment_counts, total);
    let category_percentages = percentages(&category_counts, total);

    let recommended_actions = category_percentages
        .iter()
        .map(|(category, pct)| (category.clone(), *pct > RECOMMENDED_ACTION_THRESHOLD_PERCENT))
        .collect();

    let mut top_important_comments: Vec<AnalysisRecord> = processable
        .iter()
        .filter(|r| r.importance() >= TOP_IMPORTANCE_CUTOFF)
        .cloned()
        .collect();
    top_important_comments.sort_by(|a, b| {
        b.importance()
            .cmp(&a.importance())
            .then(a.original_csv_row_index().cmp(&b.original_csv_row_index()))
    });

    let high_risk_comments_list: Vec<AnalysisRecord> =
        processable.iter().filter(|r| r.is_high_risk()).cloned().collect();

    AggregateStatistics {
        total_comments: records.len(),
        total_processable_comments: total,
        sentiment_counts,
        sentiment_percentages,
        category_counts,
        category_percentages,
        high_risk_count: high_risk_comments_list.len(),
        recommended_actions,
        top_important_comments,
        high_risk_comments_list,
        all_mapped_comments_list: processable,
    }
}

fn count_by<'a>(
    records: &'a [AnalysisRecord],
    key: impl Fn(&'a AnalysisRecord) -> &'a str,
) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(key(record).to_string()).or_insert(0) += 1;
    }
    counts
}

fn percentages(counts: &BTreeMap<String, usize>, total: usize) -> BTreeMap<String, f64> {
    counts
        .iter()
        .map(|(label, count)| (label.clone(), *count as f64 / total as f64 * 100.0))
        .collect()
}
