use std::io::Write;
use std::path::PathBuf;

use crate::classify::{classify, StatsReport};
use crate::config::AnalysisConfig;
use crate::errors::Result;
use crate::extraction::extract_records;
use crate::io::output::{create_writer, OutputFormat};

pub struct StatsConfig {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub analysis: AnalysisConfig,
}

impl StatsConfig {
    /// The build's fixed settings for one input file.
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: OutputFormat::build_default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

/// Extract, classify, then render. Nothing reaches `out` unless extraction
/// and classification both succeed.
pub fn handle_stats<W: Write>(config: &StatsConfig, out: W) -> Result<StatsReport> {
    let records = extract_records(&config.path, &config.analysis)?;
    let report = classify(&records, &config.analysis)?;

    log::info!(
        "Classified {} alerts for '{}' with taxonomy {}",
        report.total,
        report.policy_name,
        report.taxonomy_version
    );

    create_writer(config.format, out).write_report(&report)?;
    Ok(report)
}
