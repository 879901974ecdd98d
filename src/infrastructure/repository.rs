//! Workspace discovery and layout on the file system

use crate::error::{LogbookError, Result};
use crate::infrastructure::config::LOGBOOK_DIR;
use crate::infrastructure::{Config, FileStorage};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the workspace root explicitly
pub const LOGBOOK_ROOT_ENV: &str = "LOGBOOK_ROOT";

/// Abstract repository for workspace operations
pub trait LogbookRepository {
    /// Load configuration from .logbook/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .logbook/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .logbook directory exists
    fn is_initialized(&self) -> bool;

    /// Create .logbook directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of LogbookRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover the workspace root.
    /// LOGBOOK_ROOT wins when set; otherwise walk up from the current directory.
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var(LOGBOOK_ROOT_ENV) {
            let path = PathBuf::from(root_path);
            if Self::has_logbook_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(LogbookError::Config(format!(
                    "LOGBOOK_ROOT is set to '{}' but no .logbook directory found. \
                    Run 'logbook init' in that directory or unset LOGBOOK_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover workspace root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_logbook_dir(&current) {
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(LogbookError::NotLogbookDirectory(start.to_path_buf())),
            }
        }
    }

    /// Directory holding one file per storage key
    pub fn storage_dir(&self) -> PathBuf {
        self.root.join(LOGBOOK_DIR).join("storage")
    }

    /// Storage medium for this workspace, bounded by the configured quota
    pub fn storage(&self, config: &Config) -> FileStorage {
        FileStorage::new(self.storage_dir(), config.quota_bytes)
    }

    fn has_logbook_dir(path: &Path) -> bool {
        path.join(LOGBOOK_DIR).is_dir()
    }
}

impl LogbookRepository for FileSystemRepository {
    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_logbook_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let logbook_dir = self.root.join(LOGBOOK_DIR);

        if logbook_dir.exists() {
            return Err(LogbookError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&logbook_dir)?;
        fs::create_dir(self.storage_dir())?;
        Ok(())
    }
}
