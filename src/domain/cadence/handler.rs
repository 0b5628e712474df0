use axum::{extract::State, Json};

use super::dto::CadenceStatusResponse;
use crate::state::AppState;
use crate::utils::{error::AppError, response::BaseResponse, response::ErrorResponse};

/// 자동 생성 시작
///
/// 입력 문구가 비어 있으면 타이머를 걸지 않고 거절합니다.
#[utoipa::path(
    post,
    path = "/api/cadence/start",
    tag = "Cadence",
    responses(
        (status = 200, description = "시작 성공", body = CadenceStatusResponse),
        (status = 400, description = "입력 문구 없음", body = ErrorResponse),
        (status = 409, description = "이미 실행 중", body = ErrorResponse)
    )
)]
pub async fn start_cadence(
    State(state): State<AppState>,
) -> Result<Json<BaseResponse<CadenceStatusResponse>>, AppError> {
    state
        .cadence
        .start(state.prompt_service.clone(), state.settings.clone())
        .await?;

    Ok(Json(BaseResponse::success(CadenceStatusResponse {
        running: true,
        countdown: state.cadence.countdown(),
    })))
}

/// 자동 생성 중지
///
/// 두 타이머를 내리고 카운트다운을 되돌립니다. 이미 나가 있는 원격 호출은
/// 중단하지 않습니다.
#[utoipa::path(
    post,
    path = "/api/cadence/stop",
    tag = "Cadence",
    responses(
        (status = 200, description = "중지 완료", body = CadenceStatusResponse)
    )
)]
pub async fn stop_cadence(
    State(state): State<AppState>,
) -> Json<BaseResponse<CadenceStatusResponse>> {
    state.cadence.stop();

    Json(BaseResponse::success(CadenceStatusResponse {
        running: false,
        countdown: state.cadence.countdown(),
    }))
}

/// 자동 생성 상태 조회
#[utoipa::path(
    get,
    path = "/api/cadence",
    tag = "Cadence",
    responses(
        (status = 200, description = "조회 성공", body = CadenceStatusResponse)
    )
)]
pub async fn cadence_status(
    State(state): State<AppState>,
) -> Json<BaseResponse<CadenceStatusResponse>> {
    Json(BaseResponse::success(CadenceStatusResponse {
        running: state.cadence.is_running(),
        countdown: state.cadence.countdown(),
    }))
}
