//! CLI command implementations for pager-stats.
//!
//! Available commands:
//! - **stats**: Classify one PagerDuty export and print category counts

pub mod stats;
