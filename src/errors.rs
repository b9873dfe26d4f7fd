//! Error type for pager-stats operations.
//!
//! Every failure is terminal: a run either prints a complete report or
//! prints nothing on standard output.
//!
//! # Error Codes
//!
//! Error codes are assigned by category:
//! - E001-E009: I/O and filesystem errors
//! - E010-E019: Input parse errors
//! - E020-E029: Configuration errors
//! - E040-E049: CLI errors

use std::path::PathBuf;
use thiserror::Error;

/// Structured error code for documentation and programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(&'static str);

impl ErrorCode {
    /// I/O error - input file could not be opened
    pub const IO_FILE_OPEN: ErrorCode = ErrorCode("E001");
    /// I/O error - generic
    pub const IO_GENERIC: ErrorCode = ErrorCode("E009");

    /// Parse error - row has too few fields for the column map
    pub const PARSE_MALFORMED_ROW: ErrorCode = ErrorCode("E010");
    /// Parse error - CSV syntax
    pub const PARSE_CSV: ErrorCode = ErrorCode("E011");

    /// Config error - invalid taxonomy or column map
    pub const CONFIG_INVALID: ErrorCode = ErrorCode("E020");

    /// CLI error - wrong argument count
    pub const CLI_USAGE: ErrorCode = ErrorCode("E040");

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Main error type for pager-stats operations
#[derive(Debug, Error)]
pub enum PagerStatsError {
    /// Wrong command line; the caller prints the usage line
    #[error("{0}")]
    Usage(String),

    /// Input file missing or unreadable
    #[error("cannot open {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row is narrower than the column map requires
    #[error("row {row} has {found} fields, at least {required} required")]
    MalformedRow {
        row: u64,
        found: usize,
        required: usize,
    },

    /// Lower-level CSV syntax or read error
    #[error(transparent)]
    Parse(#[from] csv::Error),

    /// Taxonomy or column map rejected by validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Output write errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PagerStatsError {
    pub fn file_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileOpen {
            path: path.into(),
            source,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Get the structured error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Usage(_) => ErrorCode::CLI_USAGE,
            Self::FileOpen { .. } => ErrorCode::IO_FILE_OPEN,
            Self::MalformedRow { .. } => ErrorCode::PARSE_MALFORMED_ROW,
            Self::Parse(_) => ErrorCode::PARSE_CSV,
            Self::Config(_) => ErrorCode::CONFIG_INVALID,
            Self::Io(_) => ErrorCode::IO_GENERIC,
        }
    }

    /// Format as `Error [E010]: message` for the terminal.
    pub fn format_with_code(&self) -> String {
        format!("Error [{}]: {}", self.code(), self)
    }
}

/// Result type alias for pager-stats operations
pub type Result<T> = std::result::Result<T, PagerStatsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_by_category() {
        let open = PagerStatsError::file_open(
            "/missing.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!(open.code(), ErrorCode::IO_FILE_OPEN);
        assert!(open.code().as_str().starts_with("E00"));

        let row = PagerStatsError::MalformedRow {
            row: 3,
            found: 5,
            required: 8,
        };
        assert_eq!(row.code().as_str(), "E010");
        assert_eq!(PagerStatsError::config("bad").code().as_str(), "E020");
        assert_eq!(PagerStatsError::Usage("x".into()).code().as_str(), "E040");
    }

    #[test]
    fn test_malformed_row_message() {
        let err = PagerStatsError::MalformedRow {
            row: 2,
            found: 3,
            required: 8,
        };
        assert_eq!(
            err.format_with_code(),
            "Error [E010]: row 2 has 3 fields, at least 8 required"
        );
    }

    #[test]
    fn test_csv_error_message_not_prefixed_twice() {
        let inner = csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "stream ended inside a record",
        ));
        let expected = inner.to_string();
        let err = PagerStatsError::from(inner);

        assert_eq!(err.code(), ErrorCode::PARSE_CSV);
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn test_file_open_message_names_path() {
        let err = PagerStatsError::file_open(
            "/tmp/pages.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/pages.csv"));
        assert!(msg.contains("No such file"));
    }
}
