mod columns;
pub mod taxonomy;

pub use columns::ColumnMap;
pub use taxonomy::{
    DerivedRule, PatternRule, ReportLine, Sign, Taxonomy, TaxonomyVersion, Term,
};

use crate::errors::{PagerStatsError, Result};

/// Escalation policy whose pages are analyzed.
pub const DEFAULT_POLICY_NAME: &str = "Cloud SaaS Incident Management";

/// Everything the extractor and classifier need for one run.
///
/// Nothing is read from the environment or a config file; the default
/// value is the build's fixed policy, column layout and current taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub policy_name: String,
    pub columns: ColumnMap,
    pub taxonomy: Taxonomy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            policy_name: DEFAULT_POLICY_NAME.to_string(),
            columns: ColumnMap::default(),
            taxonomy: Taxonomy::current(),
        }
    }
}

impl AnalysisConfig {
    pub fn with_taxonomy(mut self, taxonomy: Taxonomy) -> Self {
        self.taxonomy = taxonomy;
        self
    }

    pub fn with_policy_name(mut self, policy_name: impl Into<String>) -> Self {
        self.policy_name = policy_name.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.policy_name.is_empty() {
            return Err(PagerStatsError::config("policy name must not be empty"));
        }
        self.taxonomy.validate()
    }
}
