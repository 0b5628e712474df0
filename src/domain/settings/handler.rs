use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use validator::Validate;

use super::dto::{
    CredentialResponse, SaveCredentialRequest, SettingsResponse, UpdateSettingsRequest,
};
use crate::state::AppState;
use crate::storage::KEY_API_CREDENTIAL;
use crate::utils::{error::AppError, response::BaseResponse, response::ErrorResponse};

/// 설정 조회
#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "Settings",
    responses(
        (status = 200, description = "조회 성공", body = SettingsResponse)
    )
)]
pub async fn get_settings(State(state): State<AppState>) -> Json<BaseResponse<SettingsResponse>> {
    let settings = state.settings.read().await;
    Json(BaseResponse::success(SettingsResponse::from_settings(
        &settings,
    )))
}

/// 설정 변경
///
/// UI 셀렉터 상태(화면 비율, 엔진, 입력 문구)를 서버에 동기화합니다.
/// 주어진 필드만 바뀝니다.
#[utoipa::path(
    put,
    path = "/api/settings",
    tag = "Settings",
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "변경 성공", body = SettingsResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse)
    )
)]
pub async fn update_settings(
    State(state): State<AppState>,
    request: Result<Json<UpdateSettingsRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<SettingsResponse>>, AppError> {
    let Json(request) = request.map_err(AppError::from)?;
    request.validate()?;

    let mut settings = state.settings.write().await;
    if let Some(aspect_ratio) = request.aspect_ratio {
        settings.aspect_ratio = aspect_ratio;
    }
    if let Some(engine) = request.engine {
        settings.engine = engine;
    }
    if let Some(phrase) = request.phrase {
        settings.phrase = phrase;
    }

    tracing::debug!(
        aspect_ratio = %settings.aspect_ratio,
        engine = ?settings.engine,
        "설정 변경"
    );

    Ok(Json(BaseResponse::success(SettingsResponse::from_settings(
        &settings,
    ))))
}

/// API 키 저장
///
/// 키를 영속 저장소에 기록하고 즉시 원격 생성 경로를 활성화합니다.
#[utoipa::path(
    put,
    path = "/api/settings/credential",
    tag = "Settings",
    request_body = SaveCredentialRequest,
    responses(
        (status = 200, description = "저장 성공", body = CredentialResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 500, description = "저장 실패", body = ErrorResponse)
    )
)]
pub async fn save_credential(
    State(state): State<AppState>,
    request: Result<Json<SaveCredentialRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<CredentialResponse>>, AppError> {
    let Json(request) = request.map_err(AppError::from)?;
    request.validate()?;

    let api_key = request.api_key.trim().to_string();
    if api_key.is_empty() {
        return Err(AppError::validation_error("유효한 API 키를 입력해주세요"));
    }

    state.store.put(KEY_API_CREDENTIAL, &api_key)?;
    state.settings.write().await.api_key = Some(api_key);

    tracing::info!("Claude API 키 저장 완료");

    Ok(Json(BaseResponse::success(CredentialResponse {
        has_credential: true,
    })))
}
