//! Application layer - Use cases and orchestration

pub mod diary_store;
pub mod init;
pub mod list_entries;
pub mod manage_config;

pub use diary_store::DiaryStore;
pub use init::InitService;
pub use list_entries::ListEntriesService;
pub use manage_config::ConfigService;
