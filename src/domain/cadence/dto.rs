use serde::Serialize;
use utoipa::ToSchema;

/// 자동 생성 상태 응답 DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CadenceStatusResponse {
    /// 자동 생성 실행 여부
    pub running: bool,
    /// 다음 발화까지 남은 시간 (초)
    #[schema(example = 42)]
    pub countdown: u32,
}
