use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 내보내기 문서 포맷 버전
pub const EXPORT_FORMAT_VERSION: &str = "1.0";

/// 프롬프트 생성 기록 한 건
///
/// 생성 이후 수정되지 않는다. 삭제(한 건 또는 전체)만 가능하다.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// 단조 증가 식별자. 가져오기 시에는 새로 발급된다.
    #[serde(default)]
    pub id: u64,

    /// 최종 생성 프롬프트
    pub prompt: String,

    /// 사용자가 입력한 원본 요청 문구 (순수 랜덤 생성이면 없음)
    #[serde(default)]
    pub original_request: Option<String>,

    /// 사람이 읽는 생성 시각 (표시 전용)
    #[serde(default)]
    pub timestamp: String,

    /// 생성 시점에 선택되어 있던 화면 비율
    #[serde(default)]
    pub aspect_ratio: String,

    /// 정렬 가능한 생성 시각. 구버전 기록에는 없을 수 있다.
    #[serde(default)]
    pub date_created: Option<DateTime<Utc>>,
}

/// 기록 내보내기/가져오기 문서
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub version: String,
    pub export_date: String,
    pub total_count: usize,
    pub prompts: Vec<HistoryEntry>,
}

/// 기록 목록 응답 DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryListResponse {
    pub total_count: usize,
    pub prompts: Vec<HistoryEntry>,
}

/// 한 건 삭제 응답 DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEntryResponse {
    /// 해당 id가 실제로 존재해서 삭제되었는지 여부
    pub removed: bool,
    pub total_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// 전체 삭제 응답 DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClearHistoryResponse {
    pub total_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// 가져오기 응답 DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub imported_count: usize,
    pub total_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}
