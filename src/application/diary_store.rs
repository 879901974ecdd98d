//! Diary store - sole owner of the persisted entry collection

use crate::domain::collection::{self, DEFAULT_STORAGE_KEY};
use crate::domain::{DiaryEntry, NewEntry};
use crate::error::{LogbookError, Result};
use crate::infrastructure::{
    FileStorage, FileSystemRepository, KeyValueStorage, LogbookRepository, StorageError,
};
use chrono::{DateTime, SubsecRound, Utc};

/// Add/list/delete over one newest-first collection kept under a single
/// storage key.
///
/// Every mutation reads the stored collection, changes it and writes the
/// whole collection back. Mutations take `&mut self`, so one store instance
/// is the only writer of its key within a process.
pub struct DiaryStore<S: KeyValueStorage> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> DiaryStore<S> {
    /// Store using the default `diaryEntries` key
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        DiaryStore {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Validate `input`, then prepend a new entry created now
    pub fn add(&mut self, input: &NewEntry) -> Result<DiaryEntry> {
        self.add_at(input, Utc::now())
    }

    /// Validate `input`, then prepend a new entry created at `now`.
    ///
    /// Nothing is written when validation fails, the stored payload cannot
    /// be parsed or a stored id already sits at `u64::MAX`; a failed write
    /// leaves the previous payload in place.
    pub fn add_at(&mut self, input: &NewEntry, now: DateTime<Utc>) -> Result<DiaryEntry> {
        let valid = input.validate()?;
        let mut entries = self.load()?;

        let created_at = now.trunc_subsecs(3);
        let now_millis = created_at.timestamp_millis().max(0) as u64;
        let id = collection::next_id(now_millis, &entries)
            .ok_or(StorageError::IdsExhausted(u64::MAX))?;
        let entry = DiaryEntry::new(valid, id, created_at);

        entries.insert(0, entry.clone());
        self.persist(&entries)?;

        tracing::debug!(id, total = entries.len(), "diary entry added");
        Ok(entry)
    }

    /// Snapshot of all entries, newest first.
    ///
    /// A corrupt payload reads as an empty diary; only an unreachable
    /// storage medium is reported as an error.
    pub fn list(&self) -> Result<Vec<DiaryEntry>> {
        match self.load() {
            Err(LogbookError::Storage(StorageError::Corrupt(e))) => {
                tracing::warn!(key = %self.key, error = %e, "stored diary is corrupt, showing it as empty");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// Remove the entry with `id`. Returns `false` when there is none.
    pub fn delete(&mut self, id: u64) -> Result<bool> {
        let mut entries = self.load()?;
        let before = entries.len();
        entries.retain(|e| e.id != id);

        if entries.len() == before {
            tracing::debug!(id, "no diary entry to delete");
            return Ok(false);
        }

        self.persist(&entries)?;
        tracing::debug!(id, total = entries.len(), "diary entry deleted");
        Ok(true)
    }

    /// Drop the stored collection entirely and return how many entries it held.
    /// A corrupt payload is removed too and counts as zero entries.
    pub fn clear(&mut self) -> Result<usize> {
        let count = self.list()?.len();
        self.storage.remove(&self.key)?;
        tracing::debug!(key = %self.key, count, "diary cleared");
        Ok(count)
    }

    fn load(&self) -> Result<Vec<DiaryEntry>> {
        match self.storage.get(&self.key)? {
            None => Ok(Vec::new()),
            Some(payload) => {
                collection::decode(&payload).map_err(|e| StorageError::Corrupt(e).into())
            }
        }
    }

    fn persist(&mut self, entries: &[DiaryEntry]) -> Result<()> {
        let payload = collection::encode(entries).map_err(StorageError::Corrupt)?;
        self.storage.set(&self.key, &payload)?;
        Ok(())
    }
}

impl DiaryStore<FileStorage> {
    /// Store for a workspace, using its configured key and quota
    pub fn open(repository: &FileSystemRepository) -> Result<Self> {
        let config = repository.load_config()?;
        Ok(DiaryStore::with_key(
            repository.storage(&config),
            config.storage_key,
        ))
    }
}
