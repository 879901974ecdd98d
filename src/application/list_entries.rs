//! List entries use case

use crate::application::DiaryStore;
use crate::domain::{DiaryEntry, EntryStatus};
use crate::error::Result;
use crate::infrastructure::KeyValueStorage;

/// Service listing diary entries with optional filtering
pub struct ListEntriesService<'a, S: KeyValueStorage> {
    store: &'a DiaryStore<S>,
}

impl<'a, S: KeyValueStorage> ListEntriesService<'a, S> {
    pub fn new(store: &'a DiaryStore<S>) -> Self {
        ListEntriesService { store }
    }

    /// Entries in stored (newest-first) order, keeping only `status` when
    /// given and at most `limit` of them.
    pub fn execute(
        &self,
        status: Option<EntryStatus>,
        limit: Option<usize>,
    ) -> Result<Vec<DiaryEntry>> {
        let mut entries = self.store.list()?;

        if let Some(wanted) = status {
            entries.retain(|e| e.status == wanted);
        }

        if let Some(n) = limit {
            entries.truncate(n);
        }

        Ok(entries)
    }
}
