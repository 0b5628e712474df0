//! In-memory state store for tests and the mock router
//!
//! Mirrors the file store's quota behavior so the history store's
//! truncate-and-retry path can be exercised without touching disk.

use std::collections::HashMap;
use std::sync::Mutex;

use super::{StateStore, StorageError};

#[derive(Default)]
pub struct MemoryStateStore {
    entries: Mutex<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 값 크기 한도를 두어 쿼터 초과 경로를 시험할 수 있게 한다
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }
}

impl StateStore for MemoryStateStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(limit) = self.quota_bytes {
            if value.len() > limit {
                return Err(StorageError::QuotaExceeded {
                    size: value.len(),
                    limit,
                });
            }
        }

        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_round_trip_a_value() {
        // Arrange
        let store = MemoryStateStore::new();

        // Act
        store.put("key", "value").unwrap();

        // Assert
        assert_eq!(store.get("key").unwrap().as_deref(), Some("value"));
    }

    #[test]
    fn should_reject_value_over_quota() {
        // Arrange
        let store = MemoryStateStore::with_quota(4);

        // Act
        let result = store.put("key", "12345");

        // Assert
        assert!(result.is_err());
        assert!(result.unwrap_err().is_quota_exceeded());
    }

    #[test]
    fn should_not_limit_without_quota() {
        // Arrange
        let store = MemoryStateStore::new();
        let large = "x".repeat(1024 * 1024);

        // Act & Assert
        assert!(store.put("key", &large).is_ok());
    }
}
