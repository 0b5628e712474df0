use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::domain::generation::engine::TargetEngine;
use crate::state::SessionSettings;

/// 허용되는 화면 비율 토큰
pub const ALLOWED_ASPECT_RATIOS: &[&str] = &["16:9", "9:16", "1:1", "4:3", "3:4"];

fn validate_aspect_ratio(value: &str) -> Result<(), ValidationError> {
    if ALLOWED_ASPECT_RATIOS.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_aspect_ratio"))
    }
}

/// 설정 조회 응답 DTO — 자격 증명 자체는 절대 돌려주지 않는다
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    #[schema(example = "16:9")]
    pub aspect_ratio: String,
    pub engine: TargetEngine,
    /// 자동 생성이 발화 시점에 읽는 입력 문구
    pub phrase: String,
    /// API 키 저장 여부
    pub has_credential: bool,
}

impl SettingsResponse {
    pub fn from_settings(settings: &SessionSettings) -> Self {
        Self {
            aspect_ratio: settings.aspect_ratio.clone(),
            engine: settings.engine,
            phrase: settings.phrase.clone(),
            has_credential: settings.has_credential(),
        }
    }
}

/// 설정 변경 요청 DTO — 주어진 필드만 바꾼다
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    #[validate(custom(function = validate_aspect_ratio))]
    #[schema(example = "9:16")]
    pub aspect_ratio: Option<String>,

    pub engine: Option<TargetEngine>,

    #[validate(length(max = 500, message = "문구는 500자 이하여야 합니다"))]
    pub phrase: Option<String>,
}

/// 자격 증명 저장 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveCredentialRequest {
    #[validate(length(min = 1, message = "유효한 API 키를 입력해주세요"))]
    #[schema(example = "sk-ant-api03-...")]
    pub api_key: String,
}

/// 자격 증명 저장 응답 DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialResponse {
    pub has_credential: bool,
}
