//! 생성 기록 저장소
//!
//! 메모리의 기록 시퀀스를 단독으로 소유하고, 변경이 일어날 때마다 전체
//! 시퀀스를 영속 저장소 미러에 기록한다. 시퀀스는 항상 최신 항목이 앞에
//! 온다. 항목은 생성 후 수정되지 않는다.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Local, Utc};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{error, warn};

use super::dto::{ExportDocument, HistoryEntry, EXPORT_FORMAT_VERSION};
use crate::storage::{SharedStateStore, StorageError, KEY_PROMPT_HISTORY};
use crate::utils::error::AppError;

/// 쿼터 초과 시 남기는 최근 기록 개수
pub const HISTORY_TRUNCATE_LIMIT: usize = 50;

/// 단조 증가 식별자 생성기
///
/// 시각(밀리초) 기반 id는 빠른 연속 생성에서 충돌할 수 있으므로, 현재
/// 시각과 `직전 id + 1` 중 큰 값을 취해 엄격한 단조성을 보장한다. 구버전
/// 기록이 남긴 시각 기반 id와도 호환된다.
pub struct IdGenerator {
    last: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::with_floor(0)
    }

    /// 기존 기록의 최대 id를 하한으로 삼는다
    pub fn with_floor(floor: u64) -> Self {
        Self {
            last: AtomicU64::new(floor),
        }
    }

    pub fn next(&self) -> u64 {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(prev + 1);
            match self.last.compare_exchange_weak(
                prev,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(observed) => prev = observed,
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// append 결과 — 생성된 항목과 영속화 경고 (있다면)
pub struct AppendOutcome {
    pub entry: HistoryEntry,
    pub persist_notice: Option<String>,
}

pub struct HistoryStore {
    entries: RwLock<Vec<HistoryEntry>>,
    store: SharedStateStore,
    ids: IdGenerator,
}

impl HistoryStore {
    /// 영속 미러에서 기록을 읽어 저장소를 초기화한다
    ///
    /// 미러가 손상되어 있으면 비우고 시작한다. 다음 영속화 때 덮어쓴다.
    pub fn load(store: SharedStateStore) -> Self {
        let entries = match store.get(KEY_PROMPT_HISTORY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
                Ok(list) => list,
                Err(e) => {
                    warn!(error = %e, "기록 미러 파싱 실패, 빈 기록으로 시작합니다");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "기록 미러 읽기 실패, 빈 기록으로 시작합니다");
                Vec::new()
            }
        };

        let floor = entries.iter().map(|entry| entry.id).max().unwrap_or(0);

        Self {
            entries: RwLock::new(entries),
            store,
            ids: IdGenerator::with_floor(floor),
        }
    }

    /// 새 항목을 만들어 맨 앞에 붙이고 전체 시퀀스를 영속화한다
    pub async fn append(
        &self,
        prompt: String,
        original_request: Option<String>,
        aspect_ratio: &str,
    ) -> AppendOutcome {
        let entry = HistoryEntry {
            id: self.ids.next(),
            prompt,
            original_request,
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            aspect_ratio: aspect_ratio.to_string(),
            date_created: Some(Utc::now()),
        };

        let mut entries = self.entries.write().await;
        entries.insert(0, entry.clone());
        let persist_notice = self.persist(&mut entries);

        AppendOutcome {
            entry,
            persist_notice,
        }
    }

    /// id가 일치하는 한 건을 삭제한다. 없는 id면 아무 일도 하지 않는다.
    pub async fn remove(&self, id: u64) -> (bool, Option<String>) {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|entry| entry.id != id);

        if entries.len() == before {
            return (false, None);
        }

        let notice = self.persist(&mut entries);
        (true, notice)
    }

    /// 전체 기록을 비우고 빈 미러를 영속화한다
    pub async fn clear(&self) -> Option<String> {
        let mut entries = self.entries.write().await;
        entries.clear();
        self.persist(&mut entries)
    }

    /// 현재 기록의 읽기 전용 사본
    pub async fn snapshot(&self) -> Vec<HistoryEntry> {
        self.entries.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// 전체 기록을 내보내기 문서로 직렬화한다
    pub async fn export(&self) -> ExportDocument {
        let entries = self.entries.read().await;
        ExportDocument {
            version: EXPORT_FORMAT_VERSION.to_string(),
            export_date: Utc::now().to_rfc3339(),
            total_count: entries.len(),
            prompts: entries.clone(),
        }
    }

    /// 내보내기 문서를 기존 기록 앞에 통째로 가져온다
    ///
    /// `prompts` 배열이 없으면 실패하고 기존 기록은 그대로 남는다.
    /// 가져온 항목에는 기존 id와 충돌하지 않도록 새 id를 발급한다.
    pub async fn import(&self, document: Value) -> Result<(usize, Option<String>), AppError> {
        let prompts = document
            .get("prompts")
            .and_then(|value| value.as_array())
            .cloned()
            .ok_or_else(|| {
                AppError::MalformedImportDocument("prompts 배열이 없습니다".to_string())
            })?;

        let mut incoming: Vec<HistoryEntry> = serde_json::from_value(Value::Array(prompts))
            .map_err(|e| AppError::MalformedImportDocument(e.to_string()))?;

        for entry in &mut incoming {
            entry.id = self.ids.next();
        }
        let imported_count = incoming.len();

        let mut entries = self.entries.write().await;
        incoming.extend(entries.drain(..));
        *entries = incoming;
        let notice = self.persist(&mut entries);

        Ok((imported_count, notice))
    }

    /// 전체 시퀀스를 영속 미러에 기록한다
    ///
    /// 쿼터 초과로 실패하면 최근 50건만 남기고 한 번 재시도한다. 재시도도
    /// 실패하면 메모리는 그대로 두고 알림만 돌려준다.
    fn persist(&self, entries: &mut Vec<HistoryEntry>) -> Option<String> {
        match self.write_mirror(entries) {
            Ok(()) => None,
            Err(err) if err.is_quota_exceeded() => {
                warn!(
                    error = %err,
                    keep = HISTORY_TRUNCATE_LIMIT,
                    "기록 미러 쿼터 초과, 최근 기록만 남기고 재시도합니다"
                );
                entries.truncate(HISTORY_TRUNCATE_LIMIT);

                match self.write_mirror(entries) {
                    Ok(()) => Some(format!(
                        "저장 공간이 부족하여 최근 {}건만 남기고 기록을 정리했습니다.",
                        HISTORY_TRUNCATE_LIMIT
                    )),
                    Err(retry_err) => {
                        error!(error = %retry_err, "기록 미러 재시도 실패");
                        Some(format!("기록 저장에 실패했습니다: {}", retry_err))
                    }
                }
            }
            Err(err) => {
                error!(error = %err, "기록 미러 기록 실패");
                Some(format!("기록 저장에 실패했습니다: {}", err))
            }
        }
    }

    fn write_mirror(&self, entries: &[HistoryEntry]) -> Result<(), StorageError> {
        let json = serde_json::to_string(entries).map_err(|e| {
            StorageError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;
        self.store.put(KEY_PROMPT_HISTORY, &json)
    }
}
