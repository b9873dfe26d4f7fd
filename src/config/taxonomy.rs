//! Incident category tables.
//!
//! A taxonomy is data: raw substring counters, derived counts built from
//! signed sums of earlier counts, and the ordered lines of the report.
//! New categories are added by writing a new [`TaxonomyVersion`], never by
//! changing the classifier.

use std::collections::HashSet;

use serde::Serialize;

use crate::errors::{PagerStatsError, Result};

/// Released category tables, oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TaxonomyVersion {
    /// Allocator website checks, ctor capacity and generic outages.
    V1,
    /// Adds old ctor messages, monitor checks, index freshness and host
    /// terminations. Soteria allocator alerts are reported on their own.
    V2,
    /// Merges Soteria and ESSP allocator checks into Bad Allocators and ESSP
    /// heartbeats into outages. Adds Zookeeper disk alerts.
    V3,
}

impl TaxonomyVersion {
    /// The table compiled into the binary.
    pub const CURRENT: TaxonomyVersion = TaxonomyVersion::V3;

    pub const ALL: [TaxonomyVersion; 3] =
        [TaxonomyVersion::V1, TaxonomyVersion::V2, TaxonomyVersion::V3];
}

impl std::fmt::Display for TaxonomyVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::V1 => write!(f, "v1"),
            Self::V2 => write!(f, "v2"),
            Self::V3 => write!(f, "v3"),
        }
    }
}

/// A raw counter: records whose description contains `match_text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternRule {
    pub key: String,
    pub match_text: String,
}

impl PatternRule {
    pub fn new(key: impl Into<String>, match_text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            match_text: match_text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Add,
    Subtract,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub sign: Sign,
    pub key: String,
}

/// A count computed from raw counts or earlier derived counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedRule {
    pub key: String,
    pub terms: Vec<Term>,
}

impl DerivedRule {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            terms: Vec::new(),
        }
    }

    pub fn plus(mut self, key: impl Into<String>) -> Self {
        self.terms.push(Term {
            sign: Sign::Add,
            key: key.into(),
        });
        self
    }

    pub fn minus(mut self, key: impl Into<String>) -> Self {
        self.terms.push(Term {
            sign: Sign::Subtract,
            key: key.into(),
        });
        self
    }
}

/// One rendered metric: a label and the count it shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub label: String,
    pub key: String,
}

impl ReportLine {
    pub fn new(label: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            key: key.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    pub version: TaxonomyVersion,
    pub patterns: Vec<PatternRule>,
    pub derived: Vec<DerivedRule>,
    pub lines: Vec<ReportLine>,
}

// Page descriptions as they appear in the export.
const OLD_CTOR_OUT_OF_CAPACITY: &str = "has logged a NotEnoughCapacity";
const CTOR_OUT_OF_CAPACITY: &str = "cannot find enough available allocator capacity";
const ALLOCATORS_DOWN: &str = "Website | Your site 'Allocators:";
const SOTERIA_ALLOCATORS_DOWN: &str = "Soteria :: Allocator is Unhealthy";
const ESSP_ALLOCATORS_DOWN: &str = "for check 'Allocators'";
const LOGGING_DOWN: &str = "Website | Your site 'Logging:";
const METRICS_DOWN: &str = "Website | Your site 'Metrics:";
const MONITOR_DOWN: &str = "Website | Your site 'Monitor:";
const OTHERS_DOWN: &str = "went down";
const ESSP_OTHERS_DOWN: &str = "Heartbeat Alert";
const INDEX_FRESHNESS: &str = "Index freshness alert";
const TERMINATED_ON_HOST_ERROR: &str = "Instance(s) Terminated on Host Error";
const INCIDENTS: &str = "Cloudbot's created a new incident";
const ZOOKEEPER_DISK: &str = "Sent bytes for cloud-production-168820 director";

impl Taxonomy {
    pub fn for_version(version: TaxonomyVersion) -> Self {
        match version {
            TaxonomyVersion::V1 => Self::v1(),
            TaxonomyVersion::V2 => Self::v2(),
            TaxonomyVersion::V3 => Self::v3(),
        }
    }

    pub fn current() -> Self {
        Self::for_version(TaxonomyVersion::CURRENT)
    }

    fn v1() -> Self {
        Self {
            version: TaxonomyVersion::V1,
            patterns: vec![
                PatternRule::new("ctor_out_of_capacity", CTOR_OUT_OF_CAPACITY),
                PatternRule::new("allocators_down", ALLOCATORS_DOWN),
                PatternRule::new("logging_down", LOGGING_DOWN),
                PatternRule::new("metrics_down", METRICS_DOWN),
                PatternRule::new("others_down", OTHERS_DOWN),
                PatternRule::new("incidents", INCIDENTS),
            ],
            derived: vec![
                DerivedRule::new("logging_metrics_down")
                    .plus("logging_down")
                    .plus("metrics_down"),
                DerivedRule::new("non_allocator_failures")
                    .plus("others_down")
                    .minus("logging_metrics_down")
                    .minus("allocators_down"),
            ],
            lines: vec![
                ReportLine::new("Ctor Out of Capacity Alerts", "ctor_out_of_capacity"),
                ReportLine::new("Bad Allocators", "allocators_down"),
                ReportLine::new("Total Incidents", "incidents"),
                ReportLine::new("Total Logging/Metrics", "logging_metrics_down"),
                ReportLine::new("Non-allocator-failures", "non_allocator_failures"),
            ],
        }
    }

    fn v2() -> Self {
        Self {
            version: TaxonomyVersion::V2,
            patterns: vec![
                PatternRule::new("old_ctor_out_of_capacity", OLD_CTOR_OUT_OF_CAPACITY),
                PatternRule::new("ctor_out_of_capacity", CTOR_OUT_OF_CAPACITY),
                PatternRule::new("allocators_down", ALLOCATORS_DOWN),
                PatternRule::new("soteria_allocators_down", SOTERIA_ALLOCATORS_DOWN),
                PatternRule::new("logging_down", LOGGING_DOWN),
                PatternRule::new("metrics_down", METRICS_DOWN),
                PatternRule::new("monitor_down", MONITOR_DOWN),
                PatternRule::new("others_down", OTHERS_DOWN),
                PatternRule::new("index_freshness", INDEX_FRESHNESS),
                PatternRule::new("terminated_on_host_error", TERMINATED_ON_HOST_ERROR),
                PatternRule::new("incidents", INCIDENTS),
            ],
            derived: vec![
                DerivedRule::new("ctor_out_of_capacity_total")
                    .plus("ctor_out_of_capacity")
                    .plus("old_ctor_out_of_capacity"),
                DerivedRule::new("logging_metrics_down")
                    .plus("logging_down")
                    .plus("metrics_down")
                    .plus("monitor_down"),
                DerivedRule::new("non_allocator_failures")
                    .plus("others_down")
                    .minus("logging_metrics_down")
                    .minus("allocators_down"),
            ],
            lines: vec![
                ReportLine::new("Ctor Out of Capacity Alerts", "ctor_out_of_capacity_total"),
                ReportLine::new("Bad Allocators", "allocators_down"),
                ReportLine::new("Bad Allocators (soteria)", "soteria_allocators_down"),
                ReportLine::new("Allocators on Old Templates", "terminated_on_host_error"),
                ReportLine::new("Total Incidents", "incidents"),
                ReportLine::new("Total Logging/Metrics", "logging_metrics_down"),
                ReportLine::new("Total Index Freshness", "index_freshness"),
                ReportLine::new("Non-allocator-failures", "non_allocator_failures"),
            ],
        }
    }

    fn v3() -> Self {
        Self {
            version: TaxonomyVersion::V3,
            patterns: vec![
                PatternRule::new("old_ctor_out_of_capacity", OLD_CTOR_OUT_OF_CAPACITY),
                PatternRule::new("ctor_out_of_capacity", CTOR_OUT_OF_CAPACITY),
                PatternRule::new("allocators_down", ALLOCATORS_DOWN),
                PatternRule::new("soteria_allocators_down", SOTERIA_ALLOCATORS_DOWN),
                PatternRule::new("essp_allocators_down", ESSP_ALLOCATORS_DOWN),
                PatternRule::new("logging_down", LOGGING_DOWN),
                PatternRule::new("metrics_down", METRICS_DOWN),
                PatternRule::new("monitor_down", MONITOR_DOWN),
                PatternRule::new("others_down", OTHERS_DOWN),
                PatternRule::new("essp_others_down", ESSP_OTHERS_DOWN),
                PatternRule::new("index_freshness", INDEX_FRESHNESS),
                PatternRule::new("terminated_on_host_error", TERMINATED_ON_HOST_ERROR),
                PatternRule::new("incidents", INCIDENTS),
                PatternRule::new("zookeeper_disk", ZOOKEEPER_DISK),
            ],
            derived: vec![
                DerivedRule::new("ctor_out_of_capacity_total")
                    .plus("ctor_out_of_capacity")
                    .plus("old_ctor_out_of_capacity"),
                DerivedRule::new("all_down")
                    .plus("others_down")
                    .plus("essp_others_down"),
                DerivedRule::new("all_allocators")
                    .plus("essp_allocators_down")
                    .plus("allocators_down")
                    .plus("soteria_allocators_down"),
                DerivedRule::new("logging_metrics_down")
                    .plus("logging_down")
                    .plus("metrics_down")
                    .plus("monitor_down"),
                DerivedRule::new("non_allocator_failures")
                    .plus("all_down")
                    .minus("logging_metrics_down")
                    .minus("all_allocators"),
            ],
            lines: vec![
                ReportLine::new("Ctor Out of Capacity Alerts", "ctor_out_of_capacity_total"),
                ReportLine::new("Total Zookeeper Disk Alerts", "zookeeper_disk"),
                ReportLine::new("Bad Allocators", "all_allocators"),
                ReportLine::new("Bad Allocators (soteria)", "soteria_allocators_down"),
                ReportLine::new("Allocators on Old Templates", "terminated_on_host_error"),
                ReportLine::new("Total Incidents", "incidents"),
                ReportLine::new("Total Logging/Metrics", "logging_metrics_down"),
                ReportLine::new("Total Index Freshness", "index_freshness"),
                ReportLine::new("Non-allocator-failures", "non_allocator_failures"),
            ],
        }
    }

    /// Check that every key is unique, every derived term names a raw rule
    /// or an earlier derived rule, and every report line names a known key.
    pub fn validate(&self) -> Result<()> {
        let mut known: HashSet<&str> = HashSet::new();

        for rule in &self.patterns {
            if rule.match_text.is_empty() {
                return Err(PagerStatsError::config(format!(
                    "pattern '{}' has an empty match text",
                    rule.key
                )));
            }
            if !known.insert(rule.key.as_str()) {
                return Err(PagerStatsError::config(format!(
                    "duplicate key '{}'",
                    rule.key
                )));
            }
        }

        for rule in &self.derived {
            if rule.terms.is_empty() {
                return Err(PagerStatsError::config(format!(
                    "derived count '{}' has no terms",
                    rule.key
                )));
            }
            if let Some(term) = rule.terms.iter().find(|t| !known.contains(t.key.as_str())) {
                return Err(PagerStatsError::config(format!(
                    "derived count '{}' references '{}' before it is defined",
                    rule.key, term.key
                )));
            }
            if !known.insert(rule.key.as_str()) {
                return Err(PagerStatsError::config(format!(
                    "duplicate key '{}'",
                    rule.key
                )));
            }
        }

        match self.lines.iter().find(|l| !known.contains(l.key.as_str())) {
            Some(line) => Err(PagerStatsError::config(format!(
                "report line '{}' references unknown key '{}'",
                line.label, line.key
            ))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_released_version_validates() {
        for version in TaxonomyVersion::ALL {
            let taxonomy = Taxonomy::for_version(version);
            assert_eq!(taxonomy.version, version);
            assert!(taxonomy.validate().is_ok(), "{version} failed validation");
        }
    }

    #[test]
    fn test_current_report_order() {
        let labels: Vec<_> = Taxonomy::current()
            .lines
            .iter()
            .map(|l| l.label.clone())
            .collect();
        assert_eq!(
            labels,
            vec![
                "Ctor Out of Capacity Alerts",
                "Total Zookeeper Disk Alerts",
                "Bad Allocators",
                "Bad Allocators (soteria)",
                "Allocators on Old Templates",
                "Total Incidents",
                "Total Logging/Metrics",
                "Total Index Freshness",
                "Non-allocator-failures",
            ]
        );
    }

    #[test]
    fn test_soteria_merged_only_from_v3() {
        let merged = |version| {
            Taxonomy::for_version(version)
                .derived
                .iter()
                .flat_map(|d| d.terms.iter())
                .any(|t| t.key == "soteria_allocators_down")
        };
        assert!(!merged(TaxonomyVersion::V2));
        assert!(merged(TaxonomyVersion::V3));
    }

    #[test]
    fn test_forward_reference_rejected() {
        let taxonomy = Taxonomy {
            version: TaxonomyVersion::V1,
            patterns: vec![PatternRule::new("down", "went down")],
            derived: vec![
                DerivedRule::new("a").plus("b"),
                DerivedRule::new("b").plus("down"),
            ],
            lines: vec![],
        };
        let err = taxonomy.validate().unwrap_err();
        assert!(err.to_string().contains("'a' references 'b'"));
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let taxonomy = Taxonomy {
            version: TaxonomyVersion::V1,
            patterns: vec![
                PatternRule::new("down", "went down"),
                PatternRule::new("down", "Heartbeat Alert"),
            ],
            derived: vec![],
            lines: vec![],
        };
        assert!(taxonomy.validate().is_err());
    }

    #[test]
    fn test_unknown_line_key_rejected() {
        let taxonomy = Taxonomy {
            version: TaxonomyVersion::V1,
            patterns: vec![PatternRule::new("down", "went down")],
            derived: vec![],
            lines: vec![ReportLine::new("Outages", "outages")],
        };
        assert!(taxonomy.validate().is_err());
    }

    #[test]
    fn test_empty_match_text_rejected() {
        let taxonomy = Taxonomy {
            version: TaxonomyVersion::V1,
            patterns: vec![PatternRule::new("everything", "")],
            derived: vec![],
            lines: vec![],
        };
        assert!(taxonomy.validate().is_err());
    }
}
