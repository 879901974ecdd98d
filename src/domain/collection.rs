//! Persisted form of the diary collection and id allocation

use crate::domain::DiaryEntry;

/// Storage key used when the configuration does not name one
pub const DEFAULT_STORAGE_KEY: &str = "diaryEntries";

/// Parse a stored payload into entries, keeping stored (newest-first) order
pub fn decode(payload: &str) -> serde_json::Result<Vec<DiaryEntry>> {
    serde_json::from_str(payload)
}

/// Serialize the whole collection for storage
pub fn encode(entries: &[DiaryEntry]) -> serde_json::Result<String> {
    serde_json::to_string(entries)
}

/// Allocate the id for a new entry.
///
/// Ids are the creation time in milliseconds, bumped past the largest id
/// already in the collection so they stay unique and strictly increasing
/// even when several entries are created within the same millisecond.
/// Returns `None` when a stored id already sits at `u64::MAX`.
pub fn next_id(now_millis: u64, entries: &[DiaryEntry]) -> Option<u64> {
    match entries.iter().map(|e| e.id).max() {
        Some(max) if max >= now_millis => max.checked_add(1),
        _ => Some(now_millis),
    }
}
