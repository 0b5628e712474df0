use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::engine::TargetEngine;
use super::service::GenerationOutcome;

/// 프롬프트 출처 — AI 생성인지 로컬 폴백인지
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum PromptSource {
    /// 원격 텍스트 생성 API의 응답을 그대로 사용
    Ai,
    /// 사전 치환 + 템플릿 조합으로 로컬 생성
    Fallback,
}

/// 커스텀/변주 생성 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomPromptRequest {
    /// 프롬프트에 반영할 요청 문구 (한국어 가능)
    #[validate(length(
        min = 1,
        max = 500,
        message = "요청 문구는 1자 이상 500자 이하여야 합니다"
    ))]
    #[schema(example = "옥상에서 노래하는 장면")]
    pub phrase: String,
}

/// 생성 결과 응답 DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    /// 기록에 저장된 항목의 id
    pub entry_id: u64,

    /// 최종 생성 프롬프트
    #[schema(
        example = "four-member alternative girl band in edgy streetwear dancing on rooftop, --ar 16:9 --v 6"
    )]
    pub prompt: String,

    /// 원본 요청 문구 (랜덤 생성이면 없음)
    pub original_request: Option<String>,

    pub aspect_ratio: String,

    pub engine: TargetEngine,

    /// AI 생성인지 로컬 폴백인지
    pub source: PromptSource,

    /// 폴백/저장 관련 사용자 알림
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl GenerationResponse {
    pub fn from_outcome(outcome: GenerationOutcome, engine: TargetEngine) -> Self {
        Self {
            entry_id: outcome.entry.id,
            prompt: outcome.entry.prompt,
            original_request: outcome.entry.original_request,
            aspect_ratio: outcome.entry.aspect_ratio,
            engine,
            source: outcome.source,
            notice: outcome.notice,
        }
    }
}
