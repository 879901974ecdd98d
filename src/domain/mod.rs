//! Domain layer - Diary entries and their rules

pub mod collection;
pub mod entry;
pub mod status;

pub use entry::{DiaryEntry, NewEntry, ValidEntry, ValidationError};
pub use status::EntryStatus;
