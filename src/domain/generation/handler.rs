use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use validator::Validate;

use super::dto::{CustomPromptRequest, GenerationResponse};
use crate::state::AppState;
use crate::utils::{error::AppError, response::BaseResponse, response::ErrorResponse};

/// 랜덤 프롬프트 생성
///
/// 문구 없이 새 프롬프트를 생성합니다. 키가 있으면 AI, 없으면 템플릿 조합.
#[utoipa::path(
    post,
    path = "/api/prompts/random",
    tag = "Prompt",
    responses(
        (status = 200, description = "생성 성공", body = GenerationResponse),
        (status = 500, description = "서버 에러", body = ErrorResponse)
    )
)]
pub async fn generate_random(
    State(state): State<AppState>,
) -> Result<Json<BaseResponse<GenerationResponse>>, AppError> {
    let outcome = state.prompt_service.generate_random().await;
    state.cadence.reset_countdown();

    let engine = state.settings.read().await.engine;
    Ok(Json(BaseResponse::success(
        GenerationResponse::from_outcome(outcome, engine),
    )))
}

/// 커스텀 프롬프트 생성
///
/// 사용자 문구를 반영한 프롬프트를 생성합니다.
#[utoipa::path(
    post,
    path = "/api/prompts/custom",
    tag = "Prompt",
    request_body = CustomPromptRequest,
    responses(
        (status = 200, description = "생성 성공", body = GenerationResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 500, description = "서버 에러", body = ErrorResponse)
    )
)]
pub async fn generate_custom(
    State(state): State<AppState>,
    request: Result<Json<CustomPromptRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<GenerationResponse>>, AppError> {
    let Json(request) = request.map_err(AppError::from)?;
    request.validate()?;

    let phrase = request.phrase.trim();
    if phrase.is_empty() {
        return Err(AppError::validation_error("요청 문구는 필수입니다"));
    }

    tracing::info!(phrase_length = phrase.chars().count(), "커스텀 생성 요청");

    let outcome = state.prompt_service.generate_custom(phrase).await;
    state.cadence.reset_countdown();

    let engine = state.settings.read().await.engine;
    Ok(Json(BaseResponse::success(
        GenerationResponse::from_outcome(outcome, engine),
    )))
}

/// 변주 프롬프트 생성
///
/// 창작 방향 힌트를 섞어 반복 출력을 줄인 프롬프트를 생성합니다.
/// 자동 생성 주기가 사용하는 경로와 같습니다.
#[utoipa::path(
    post,
    path = "/api/prompts/varied",
    tag = "Prompt",
    request_body = CustomPromptRequest,
    responses(
        (status = 200, description = "생성 성공", body = GenerationResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 500, description = "서버 에러", body = ErrorResponse)
    )
)]
pub async fn generate_varied(
    State(state): State<AppState>,
    request: Result<Json<CustomPromptRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<GenerationResponse>>, AppError> {
    let Json(request) = request.map_err(AppError::from)?;
    request.validate()?;

    let phrase = request.phrase.trim();
    if phrase.is_empty() {
        return Err(AppError::validation_error("요청 문구는 필수입니다"));
    }

    let outcome = state.prompt_service.generate_varied(phrase).await;
    state.cadence.reset_countdown();

    let engine = state.settings.read().await.engine;
    Ok(Json(BaseResponse::success(
        GenerationResponse::from_outcome(outcome, engine),
    )))
}
