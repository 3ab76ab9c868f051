//! Error types for dons

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the dons application
#[derive(Debug, Error)]
pub enum DonsError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Unreadable donation line: {0}")]
    Parse(String),

    #[error("Donation count is zero for day {day}, cannot compute an average")]
    DivisionByZero { day: String },

    #[error("Storage error on {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DonsError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            DonsError::Validation(_) => 2,
            DonsError::Fetch { .. } => 3,
            DonsError::Parse(_) | DonsError::DivisionByZero { .. } => 4,
            DonsError::Storage { .. } => 5,
            _ => 1,
        }
    }

    /// True for failures that happened after a page was retrieved
    pub fn is_interpretation_error(&self) -> bool {
        matches!(self, DonsError::Parse(_) | DonsError::DivisionByZero { .. })
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            DonsError::Validation(msg) => {
                format!(
                    "Invalid input: {}\n\n\
                    Expected values:\n\
                    • --year between 0 and 9999\n\
                    • --month between 1 and 12 (or --all for the whole year)\n\
                    • record dates as YYYY-mm-dd HH:MM:SS\n\n\
                    Examples:\n\
                    dons --year 2014 --month 1\n\
                    dons --year 2014 --all",
                    msg
                )
            }
            DonsError::Fetch { url, message } => {
                format!(
                    "Failed to fetch {}: {}\n\n\
                    Suggestions:\n\
                    • Check your network connection\n\
                    • Raise timeout_secs in dons.toml if the site is slow\n\
                    • Set DONS_BASE_URL if the journal moved",
                    url, message
                )
            }
            DonsError::Storage { path, .. } => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check that {} is writable\n\
                    • Pass another file with --db\n\
                    • Run 'dons records reset' to recreate the table",
                    self,
                    path.display()
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using DonsError
pub type Result<T> = std::result::Result<T, DonsError>;
