// Export modules for library usage
pub mod classify;
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod extraction;
pub mod io;

// Re-export commonly used types
pub use crate::classify::{classify, Aggregator, CountTable, MetricLine, StatsReport};
pub use crate::config::{AnalysisConfig, ColumnMap, Taxonomy, TaxonomyVersion};
pub use crate::errors::{ErrorCode, PagerStatsError};
pub use crate::extraction::{extract_records, Record, RecordReader};
pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
