//! Durable key-value state storage
//!
//! A small string key-value store in the mold of a browser `localStorage`
//! slot: whole-value writes under a per-value quota, so the history store's
//! quota-recovery path stays exercisable.

pub mod file_store;
pub mod memory;

pub use file_store::FileStateStore;
pub use memory::MemoryStateStore;

use std::sync::Arc;

/// 저장 키: Claude API 자격 증명
pub const KEY_API_CREDENTIAL: &str = "claude_api_key";
/// 저장 키: 프롬프트 생성 기록 (JSON 배열)
pub const KEY_PROMPT_HISTORY: &str = "prompt_history";

/// Per-value quota default, sized like a browser `localStorage` slot (5 MiB)
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("저장 한도 초과: {size}바이트 (한도 {limit}바이트)")]
    QuotaExceeded { size: usize, limit: usize },
    #[error("저장소 I/O 오류: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, StorageError::QuotaExceeded { .. })
    }
}

/// 문자열 키-값 영속 저장소 인터페이스
///
/// 값 전체를 통째로 교체한다. 부분 갱신은 없다.
pub trait StateStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Arc로 래핑된 StateStore (Clone 지원)
pub type SharedStateStore = Arc<dyn StateStore>;
