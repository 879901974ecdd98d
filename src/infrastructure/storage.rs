//! Key-value storage medium for the diary payload

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default quota, matching what browsers grant a site for local storage
pub const DEFAULT_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

/// The storage medium could not serve a request
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(#[from] std::io::Error),

    #[error("storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded { needed: u64, quota: u64 },

    #[error("stored payload is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("invalid storage key: '{0}'")]
    InvalidKey(String),

    #[error("no entry id left after {0}")]
    IdsExhausted(u64),
}

/// Abstract string key-value medium.
///
/// There is no append or patch operation: callers rewrite whole values.
pub trait KeyValueStorage {
    /// Read the value under `key`, `None` when the key is absent
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`; removing an absent key is not an error
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-process storage, used in tests and wherever persistence is not wanted
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
    quota: Option<u64>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    /// Storage that rejects writes pushing the total size past `quota` bytes
    pub fn with_quota(quota: u64) -> Self {
        MemoryStorage {
            values: HashMap::new(),
            quota: Some(quota),
        }
    }

    fn used_bytes_excluding(&self, key: &str) -> u64 {
        self.values
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| (k.len() + v.len()) as u64)
            .sum()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota {
            let needed = self.used_bytes_excluding(key) + (key.len() + value.len()) as u64;
            if needed > quota {
                return Err(StorageError::QuotaExceeded { needed, quota });
            }
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.values.remove(key);
        Ok(())
    }
}

/// File-backed storage: one `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    quota: u64,
}

impl FileStorage {
    pub fn new(dir: PathBuf, quota: u64) -> Self {
        FileStorage { dir, quota }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }

    /// Bytes used by every key other than `key`
    fn used_bytes_excluding(&self, key: &str) -> Result<u64, StorageError> {
        if !self.dir.exists() {
            return Ok(0);
        }

        let own = format!("{}.json", key);
        let mut used = 0;
        for entry in fs::read_dir(&self.dir)? {
            let Ok(entry) = entry else {
                continue;
            };
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if name == own || !name.ends_with(".json") {
                continue;
            }
            used += entry.metadata()?.len();
        }
        Ok(used)
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Unavailable(e)),
        }
    }

    /// Writes to a temp file in the same directory, then renames it into
    /// place, so a failed write leaves the previous value intact.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;

        let needed = self.used_bytes_excluding(key)? + value.len() as u64;
        if needed > self.quota {
            return Err(StorageError::QuotaExceeded {
                needed,
                quota: self.quota,
            });
        }

        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }

        let pid = std::process::id();
        let tmp_path = self.dir.join(format!("{}.json.tmp-{}", key, pid));
        let backup_path = self.dir.join(format!("{}.json.bak-{}", key, pid));

        write_temp(&tmp_path, |file| file.write_all(value.as_bytes()))?;
        replace_file(&tmp_path, &path, &backup_path)?;

        tracing::debug!(key, bytes = value.len(), "storage value written");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Unavailable(e)),
        }
    }
}

/// Create `tmp_path` and fill it through `write`.
/// A failed write removes the partial file.
fn write_temp<F>(tmp_path: &Path, write: F) -> io::Result<()>
where
    F: FnOnce(&mut fs::File) -> io::Result<()>,
{
    let mut file = fs::File::create(tmp_path)?;
    let result = write(&mut file);
    drop(file);

    if result.is_err() {
        let _ = fs::remove_file(tmp_path);
    }
    result
}

/// Move `tmp_path` over `path`.
///
/// Windows refuses to rename over an existing file. There the old file is
/// moved to `backup_path` first and put back if the second rename fails.
fn replace_file(tmp_path: &Path, path: &Path, backup_path: &Path) -> io::Result<()> {
    let Err(e) = fs::rename(tmp_path, path) else {
        return Ok(());
    };

    if !path.exists() {
        let _ = fs::remove_file(tmp_path);
        return Err(e);
    }

    if let Err(e) = fs::rename(path, backup_path) {
        let _ = fs::remove_file(tmp_path);
        return Err(e);
    }

    if let Err(e) = fs::rename(tmp_path, path) {
        let _ = fs::rename(backup_path, path);
        let _ = fs::remove_file(tmp_path);
        return Err(e);
    }

    let _ = fs::remove_file(backup_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_get_missing_key() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("diaryEntries").unwrap(), None);
    }

    #[test]
    fn test_memory_set_overwrites() {
        let mut storage = MemoryStorage::new();
        storage.set("k", "one").unwrap();
        storage.set("k", "two").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn test_memory_remove_absent_key() {
        let mut storage = MemoryStorage::new();
        storage.remove("nothing").unwrap();
    }

    #[test]
    fn test_memory_quota_rejects_and_keeps_old_value() {
        let mut storage = MemoryStorage::with_quota(10);
        storage.set("k", "small").unwrap();

        let err = storage.set("k", "much too large").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { quota: 10, .. }));
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("small"));
    }

    #[test]
    fn test_file_get_missing_key() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path().join("storage"), DEFAULT_QUOTA_BYTES);
        assert_eq!(storage.get("diaryEntries").unwrap(), None);
    }

    #[test]
    fn test_file_set_creates_dir_and_file() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("storage");
        let mut storage = FileStorage::new(dir.clone(), DEFAULT_QUOTA_BYTES);

        storage.set("diaryEntries", "[]").unwrap();

        assert!(dir.join("diaryEntries.json").exists());
        assert_eq!(storage.get("diaryEntries").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_set_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("storage");
        let mut storage = FileStorage::new(dir.clone(), DEFAULT_QUOTA_BYTES);

        storage.set("k", "one").unwrap();
        storage.set("k", "two").unwrap();

        let names: Vec<String> = fs::read_dir(&dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["k.json".to_string()]);
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn test_failed_temp_write_removes_partial_file() {
        let temp = TempDir::new().unwrap();
        let tmp_path = temp.path().join("k.json.tmp-1");

        let result = write_temp(&tmp_path, |file| {
            file.write_all(b"[{\"id\":")?;
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        });

        assert!(result.is_err());
        assert!(!tmp_path.exists());
    }

    #[test]
    fn test_failed_replace_restores_previous_value() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("k.json");
        let backup_path = temp.path().join("k.json.bak-1");
        fs::write(&path, "old").unwrap();

        // A temp file that is gone makes every rename of it fail
        let missing_tmp = temp.path().join("k.json.tmp-1");
        let result = replace_file(&missing_tmp, &path, &backup_path);

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "old");
        assert!(!backup_path.exists());
    }

    #[test]
    fn test_replace_without_previous_value() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("k.json");
        let tmp_path = temp.path().join("k.json.tmp-1");
        let backup_path = temp.path().join("k.json.bak-1");
        fs::write(&tmp_path, "new").unwrap();

        replace_file(&tmp_path, &path, &backup_path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert!(!tmp_path.exists());
        assert!(!backup_path.exists());
    }

    #[test]
    fn test_file_remove() {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::new(temp.path().to_path_buf(), DEFAULT_QUOTA_BYTES);

        storage.set("k", "value").unwrap();
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);

        // Removing again is fine
        storage.remove("k").unwrap();
    }

    #[test]
    fn test_file_quota_counts_other_keys() {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::new(temp.path().to_path_buf(), 12);

        storage.set("a", "12345678").unwrap();
        // Replacing a key does not count its old size
        storage.set("a", "abcdefgh").unwrap();

        let err = storage.set("b", "12345").unwrap_err();
        assert!(matches!(
            err,
            StorageError::QuotaExceeded {
                needed: 13,
                quota: 12
            }
        ));
        assert_eq!(storage.get("b").unwrap(), None);
    }

    #[test]
    fn test_file_rejects_path_like_keys() {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::new(temp.path().to_path_buf(), DEFAULT_QUOTA_BYTES);

        for key in ["", "../escape", "a/b", "with space"] {
            assert!(matches!(
                storage.set(key, "x"),
                Err(StorageError::InvalidKey(_))
            ));
        }
    }
}
