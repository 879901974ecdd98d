//! Configuration management

use crate::domain::collection::DEFAULT_STORAGE_KEY;
use crate::error::{LogbookError, Result};
use crate::infrastructure::storage::DEFAULT_QUOTA_BYTES;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the per-workspace metadata directory
pub const LOGBOOK_DIR: &str = ".logbook";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default = "default_quota_bytes")]
    pub quota_bytes: u64,
    pub created: DateTime<Utc>,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_quota_bytes() -> u64 {
    DEFAULT_QUOTA_BYTES
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Create a new config with default values
    pub fn new() -> Self {
        Config {
            storage_key: default_storage_key(),
            quota_bytes: default_quota_bytes(),
            created: Utc::now(),
        }
    }

    /// Load config from .logbook/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(LOGBOOK_DIR).join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LogbookError::NotLogbookDirectory(path.to_path_buf())
            } else {
                LogbookError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| LogbookError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to .logbook/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let logbook_dir = path.join(LOGBOOK_DIR);
        let config_path = logbook_dir.join("config.toml");

        if !logbook_dir.exists() {
            fs::create_dir(&logbook_dir)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }
}
