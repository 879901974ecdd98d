//! Initialize workspace use case

use crate::error::Result;
use crate::infrastructure::{Config, FileSystemRepository, LogbookRepository};
use std::fs;
use std::path::Path;

/// Service creating a new logbook workspace
pub struct InitService;

impl InitService {
    /// Initialize a new workspace at the specified path and return its config
    pub fn execute(path: &Path) -> Result<Config> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }

        let repo = FileSystemRepository::new(path.to_path_buf());
        repo.initialize()?;

        let config = Config::new();
        repo.save_config(&config)?;

        tracing::info!(root = %path.display(), "logbook initialized");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_workspace() {
        let temp = TempDir::new().unwrap();

        let config = InitService::execute(temp.path()).unwrap();

        assert!(temp.path().join(".logbook/config.toml").exists());
        assert!(temp.path().join(".logbook/storage").is_dir());
        assert_eq!(config.storage_key, "diaryEntries");
    }

    #[test]
    fn test_init_creates_missing_directory() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("portfolio").join("diary");

        InitService::execute(&nested).unwrap();

        assert!(nested.join(".logbook").is_dir());
    }

    #[test]
    fn test_init_twice_fails() {
        let temp = TempDir::new().unwrap();

        InitService::execute(temp.path()).unwrap();
        assert!(InitService::execute(temp.path()).is_err());
    }
}
