//! Extractor: CSV export rows to policy-filtered [`Record`]s.
//!
//! Column contract (0-indexed, see [`ColumnMap`](crate::config::ColumnMap)):
//!
//! | column | field         |
//! |--------|---------------|
//! | 1      | `id`          |
//! | 2      | `description` |
//! | 6      | `policy_name` |
//! | 7      | `created_at`  |
//!
//! A row with fewer than eight fields aborts extraction with
//! [`PagerStatsError::MalformedRow`], whatever its policy.

mod reader;
mod record;

pub use reader::RecordReader;
pub use record::Record;

use std::fs::File;
use std::path::Path;

use crate::config::AnalysisConfig;
use crate::errors::{PagerStatsError, Result};

/// Read every row of `path` and keep the records of the configured policy.
pub fn extract_records(path: &Path, config: &AnalysisConfig) -> Result<Vec<Record>> {
    let file = File::open(path).map_err(|e| PagerStatsError::file_open(path, e))?;
    let mut reader = RecordReader::new(file, config.columns, config.policy_name.as_str());

    let records = reader.by_ref().collect::<Result<Vec<_>>>()?;

    log::debug!(
        "Read {} rows from {}, retained {} for policy '{}'",
        reader.rows_read(),
        path.display(),
        reader.retained(),
        config.policy_name
    );

    Ok(records)
}
