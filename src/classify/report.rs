use serde::Serialize;

use super::counts::CountTable;
use crate::config::TaxonomyVersion;

/// A labelled value ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricLine {
    pub label: String,
    pub value: i64,
}

/// Result of classifying one export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsReport {
    pub policy_name: String,
    pub taxonomy_version: TaxonomyVersion,
    /// Retained records, whatever they matched.
    pub total: u64,
    pub raw: CountTable,
    pub derived: CountTable,
    /// Report lines in taxonomy order, `Total Alerts` excluded.
    pub lines: Vec<MetricLine>,
}

impl StatsReport {
    pub const TOTAL_LABEL: &'static str = "Total Alerts";

    /// Raw or derived count by key.
    pub fn get(&self, key: &str) -> Option<i64> {
        self.raw.get(key).or_else(|| self.derived.get(key))
    }

    /// `Total Alerts` followed by the taxonomy's lines.
    pub fn metrics(&self) -> impl Iterator<Item = (&str, i64)> {
        std::iter::once((Self::TOTAL_LABEL, self.total as i64))
            .chain(self.lines.iter().map(|l| (l.label.as_str(), l.value)))
    }
}
