//! Error types for logbook

use crate::domain::ValidationError;
use crate::infrastructure::StorageError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for logbook
#[derive(Debug, Error)]
pub enum LogbookError {
    #[error("Not a logbook directory: {0}")]
    NotLogbookDirectory(PathBuf),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("No entry with id {0}")]
    EntryNotFound(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl LogbookError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            LogbookError::NotLogbookDirectory(_) => 2,
            LogbookError::Validation(_) => 3,
            LogbookError::EntryNotFound(_) => 4,
            LogbookError::Storage(_) => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            LogbookError::NotLogbookDirectory(path) => {
                format!(
                    "Not a logbook directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'logbook init' in this directory to create a new diary\n\
                    • Navigate to an existing logbook directory\n\
                    • Set LOGBOOK_ROOT environment variable to your diary path",
                    path.display()
                )
            }
            LogbookError::Validation(err) => {
                format!(
                    "Please fill in all required fields: {}\n\n\
                    Required: --date YYYY-MM-DD, --title (1-100 characters),\n\
                    --status (completed, in-progress, planned)\n\
                    Optional: --description (up to 500 characters)\n\n\
                    Example:\n\
                    logbook add --date 2024-01-10 --title 'Learned X' --status completed",
                    err
                )
            }
            LogbookError::EntryNotFound(id) => {
                format!(
                    "No entry with id {}\n\n\
                    Suggestions:\n\
                    • Use 'logbook list' to see entry ids",
                    id
                )
            }
            LogbookError::Storage(StorageError::QuotaExceeded { .. }) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Delete old entries with 'logbook delete <id>'\n\
                    • Raise the limit: logbook config quota_bytes 10485760",
                    self
                )
            }
            LogbookError::Storage(StorageError::Corrupt(_)) => {
                format!(
                    "{}\n\n\
                    The stored diary could not be read, so it was left untouched.\n\
                    Suggestions:\n\
                    • Inspect .logbook/storage/ and repair the file by hand\n\
                    • Start over with 'logbook clear'",
                    self
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using LogbookError
pub type Result<T> = std::result::Result<T, LogbookError>;
