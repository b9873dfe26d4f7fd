//! Classifier/Aggregator: raw substring counts, derived counts, report.
//!
//! Categories overlap. A description containing both "went down" and an
//! allocator check string bumps both raw counters, and derived counts
//! subtract the overlap explicitly.

mod counts;
mod report;

pub use counts::CountTable;
pub use report::{MetricLine, StatsReport};

use crate::config::{AnalysisConfig, Sign, Taxonomy};
use crate::errors::{PagerStatsError, Result};
use crate::extraction::Record;

/// Incremental form of [`classify`]; records can be fed as they are read.
#[derive(Debug)]
pub struct Aggregator<'a> {
    config: &'a AnalysisConfig,
    total: u64,
    raw: Vec<i64>,
}

impl<'a> Aggregator<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            total: 0,
            raw: vec![0; config.taxonomy.patterns.len()],
        })
    }

    /// Count one retained record against every pattern.
    pub fn observe(&mut self, record: &Record) {
        self.total += 1;
        for (count, rule) in self.raw.iter_mut().zip(&self.config.taxonomy.patterns) {
            if record.description.contains(rule.match_text.as_str()) {
                *count += 1;
            }
        }
    }

    pub fn finish(self) -> Result<StatsReport> {
        let taxonomy = &self.config.taxonomy;

        let mut raw = CountTable::new();
        for (rule, count) in taxonomy.patterns.iter().zip(&self.raw) {
            raw.insert(rule.key.as_str(), *count);
        }

        let derived = derive_counts(taxonomy, &raw)?;

        let lines = taxonomy
            .lines
            .iter()
            .map(|line| -> Result<MetricLine> {
                let value = raw
                    .get(&line.key)
                    .or_else(|| derived.get(&line.key))
                    .ok_or_else(|| {
                        PagerStatsError::config(format!("unknown report key '{}'", line.key))
                    })?;
                Ok(MetricLine {
                    label: line.label.clone(),
                    value,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(StatsReport {
            policy_name: self.config.policy_name.clone(),
            taxonomy_version: taxonomy.version,
            total: self.total,
            raw,
            derived,
            lines,
        })
    }
}

fn derive_counts(taxonomy: &Taxonomy, raw: &CountTable) -> Result<CountTable> {
    let mut derived = CountTable::new();

    for rule in &taxonomy.derived {
        let mut value = 0i64;
        for term in &rule.terms {
            let operand = raw
                .get(&term.key)
                .or_else(|| derived.get(&term.key))
                .ok_or_else(|| {
                    PagerStatsError::config(format!(
                        "derived count '{}' references unknown key '{}'",
                        rule.key, term.key
                    ))
                })?;
            match term.sign {
                Sign::Add => value += operand,
                Sign::Subtract => value -= operand,
            }
        }

        if value < 0 {
            log::warn!(
                "Derived count '{}' is negative ({}); overlapping categories do not add up",
                rule.key,
                value
            );
        }
        derived.insert(rule.key.as_str(), value);
    }

    Ok(derived)
}

/// Classify retained records with the configured taxonomy.
pub fn classify(records: &[Record], config: &AnalysisConfig) -> Result<StatsReport> {
    let mut aggregator = Aggregator::new(config)?;
    for record in records {
        aggregator.observe(record);
    }
    aggregator.finish()
}
