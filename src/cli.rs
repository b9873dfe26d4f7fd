use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::errors::{PagerStatsError, Result};

pub const USAGE: &str = "Usage: ./pager-stats <pager-duty csv file>";

#[derive(Parser, Debug)]
#[command(name = "pager-stats")]
#[command(about = "Incident category counts from a PagerDuty CSV export", long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// PagerDuty incident export
    #[arg(allow_hyphen_values = true)]
    pub csv_file: PathBuf,
}

/// Parse arguments; any shape other than exactly one path is a usage error.
pub fn parse_args_from<I, T>(args: I) -> Result<Cli>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    // Program name plus exactly one path; `--` is not a terminator here.
    if args.len() != 2 {
        return Err(PagerStatsError::Usage(USAGE.to_string()));
    }

    Cli::try_parse_from(args).map_err(|e| {
        log::debug!("argument parsing failed: {e}");
        PagerStatsError::Usage(USAGE.to_string())
    })
}

pub fn parse_args() -> Result<Cli> {
    parse_args_from(std::env::args_os())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_path_accepted() {
        let cli = parse_args_from(["pager-stats", "/tmp/pages.csv"]).unwrap();
        assert_eq!(cli.csv_file, PathBuf::from("/tmp/pages.csv"));
    }

    #[test]
    fn test_missing_path_is_usage_error() {
        let err = parse_args_from(["pager-stats"]).unwrap_err();
        assert!(matches!(err, PagerStatsError::Usage(ref m) if m == USAGE));
    }

    #[test]
    fn test_extra_argument_is_usage_error() {
        let err = parse_args_from(["pager-stats", "a.csv", "b.csv"]).unwrap_err();
        assert!(matches!(err, PagerStatsError::Usage(_)));
    }

    #[test]
    fn test_double_dash_counts_as_an_argument() {
        let err = parse_args_from(["pager-stats", "--", "a.csv"]).unwrap_err();
        assert!(matches!(err, PagerStatsError::Usage(_)));
    }

    #[test]
    fn test_dash_prefixed_path_is_a_path() {
        let cli = parse_args_from(["pager-stats", "-pages.csv"]).unwrap();
        assert_eq!(cli.csv_file, PathBuf::from("-pages.csv"));
    }
}
