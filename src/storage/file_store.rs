//! File-backed state store
//!
//! One file per key under a data directory. Suitable for the single-instance
//! deployment this tool targets; writes go through `std::fs` under a lock.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::{debug, info};

use super::{StateStore, StorageError, DEFAULT_QUOTA_BYTES};

pub struct FileStateStore {
    data_dir: PathBuf,
    quota_bytes: usize,
    /// Lock for thread-safe file operations
    lock: Mutex<()>,
}

impl FileStateStore {
    /// Create a store with the default quota
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        Self::with_quota(data_dir, DEFAULT_QUOTA_BYTES)
    }

    /// Create a store with a custom per-value quota
    pub fn with_quota(data_dir: impl Into<PathBuf>, quota_bytes: usize) -> Result<Self, StorageError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;

        info!(
            data_dir = %data_dir.display(),
            quota_bytes,
            "File state store initialized"
        );

        Ok(Self {
            data_dir,
            quota_bytes,
            lock: Mutex::new(()),
        })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(key)
    }
}

impl StateStore for FileStateStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().unwrap();

        match fs::read_to_string(self.key_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if value.len() > self.quota_bytes {
            return Err(StorageError::QuotaExceeded {
                size: value.len(),
                limit: self.quota_bytes,
            });
        }

        let _guard = self.lock.lock().unwrap();
        let path = self.key_path(key);
        fs::write(&path, value)?;

        debug!(key, bytes = value.len(), path = %path.display(), "State written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap();

        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
