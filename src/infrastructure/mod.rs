//! Infrastructure layer - Storage medium, configuration and workspace layout

pub mod config;
pub mod repository;
pub mod storage;

pub use config::Config;
pub use repository::{FileSystemRepository, LogbookRepository};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
