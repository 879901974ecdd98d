//! Config management use case

use crate::error::{LogbookError, Result};
use crate::infrastructure::{Config, FileSystemRepository, LogbookRepository};

/// Service for managing workspace configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "storage_key" => Ok(config.storage_key),
            "quota_bytes" => Ok(config.quota_bytes.to_string()),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(LogbookError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: storage_key, quota_bytes, created",
                key
            ))),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "storage_key" => {
                let valid = !value.is_empty()
                    && value
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
                if !valid {
                    return Err(LogbookError::Config(format!(
                        "Invalid storage_key: '{}'. Use letters, digits, '_' or '-'",
                        value
                    )));
                }
                config.storage_key = value.to_string();
            }
            "quota_bytes" => {
                config.quota_bytes = value.parse().map_err(|_| {
                    LogbookError::Config(format!(
                        "Invalid quota_bytes: '{}'. Expected a whole number of bytes",
                        value
                    ))
                })?;
            }
            "created" => {
                return Err(LogbookError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(LogbookError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: storage_key, quota_bytes",
                    key
                )));
            }
        }

        self.repository.save_config(&config)?;
        tracing::debug!(key, value, "config updated");
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}
