use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::lock::{LockError, WriteLock};

/// Error type for storage writes. Reads never error: a slot that cannot be
/// read is simply absent.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Lock(#[from] LockError),
}

/// A keyed slot store.
///
/// The task list persists into one slot (`"tasks"`). Keeping the store
/// behind this trait lets every caller above the io layer run against an
/// in-memory map in tests.
pub trait Storage {
    /// Read the raw value for `key`. Absent or unreadable slots are `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Replace the value for `key`, overwriting any prior content.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Slot storage backed by files in the list directory: key `"tasks"` lives
/// at `tick/tasks.json`.
///
/// Writes are atomic (temp file + rename) and serialized across processes
/// by an advisory lock, so a reader never observes a half-written slot and
/// two writers never interleave.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> FileStorage {
        FileStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.slot_path(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key);
        let _lock = WriteLock::acquire_default(&self.dir)?;

        let write = || -> Result<(), std::io::Error> {
            let mut tmp = NamedTempFile::new_in(&self.dir)?;
            tmp.write_all(value.as_bytes())?;
            tmp.flush()?;
            tmp.persist(&path).map_err(|e| e.error)?;
            Ok(())
        };
        write().map_err(|e| StorageError::Write {
            path: path.clone(),
            source: e,
        })
    }
}

/// In-memory storage for tests.
#[derive(Debug, Default)]
pub struct MemStorage {
    slots: HashMap<String, String>,
}

impl MemStorage {
    pub fn new() -> MemStorage {
        MemStorage::default()
    }

    /// Storage pre-seeded with a single slot value.
    pub fn with_slot(key: &str, value: &str) -> MemStorage {
        let mut storage = MemStorage::new();
        storage.slots.insert(key.to_string(), value.to_string());
        storage
    }
}

impl Storage for MemStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
