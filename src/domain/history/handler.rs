use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::header,
    response::IntoResponse,
    Json,
};

use super::dto::{
    ClearHistoryResponse, DeleteEntryResponse, ExportDocument, HistoryListResponse, ImportResponse,
};
use crate::state::AppState;
use crate::utils::{error::AppError, response::BaseResponse, response::ErrorResponse};

/// 기록 목록 조회
///
/// 최신 항목이 앞에 오는 전체 생성 기록을 반환합니다.
#[utoipa::path(
    get,
    path = "/api/history",
    tag = "History",
    responses(
        (status = 200, description = "조회 성공", body = HistoryListResponse)
    )
)]
pub async fn list_history(
    State(state): State<AppState>,
) -> Json<BaseResponse<HistoryListResponse>> {
    let prompts = state.history.snapshot().await;

    Json(BaseResponse::success(HistoryListResponse {
        total_count: prompts.len(),
        prompts,
    }))
}

/// 기록 한 건 삭제
///
/// 삭제 확인은 UI 협력자 몫이고, 이 API는 호출되면 무조건 삭제합니다.
/// 없는 id는 아무 일도 하지 않습니다.
#[utoipa::path(
    delete,
    path = "/api/history/{id}",
    tag = "History",
    params(("id" = u64, Path, description = "삭제할 기록의 id")),
    responses(
        (status = 200, description = "삭제 처리 완료", body = DeleteEntryResponse)
    )
)]
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Json<BaseResponse<DeleteEntryResponse>> {
    let (removed, notice) = state.history.remove(id).await;

    if removed {
        tracing::info!(entry_id = id, "기록 한 건 삭제");
    } else {
        tracing::debug!(entry_id = id, "삭제 요청된 id가 존재하지 않음");
    }

    Json(BaseResponse::success(DeleteEntryResponse {
        removed,
        total_count: state.history.len().await,
        notice,
    }))
}

/// 기록 전체 삭제
///
/// 전체 삭제 확인도 UI 협력자 몫입니다.
#[utoipa::path(
    delete,
    path = "/api/history",
    tag = "History",
    responses(
        (status = 200, description = "전체 삭제 완료", body = ClearHistoryResponse)
    )
)]
pub async fn clear_history(
    State(state): State<AppState>,
) -> Json<BaseResponse<ClearHistoryResponse>> {
    let notice = state.history.clear().await;
    tracing::info!("기록 전체 삭제");

    Json(BaseResponse::success(ClearHistoryResponse {
        total_count: 0,
        notice,
    }))
}

/// 기록 내보내기
///
/// 전체 기록을 다운로드 가능한 JSON 문서로 반환합니다.
#[utoipa::path(
    get,
    path = "/api/history/export",
    tag = "History",
    responses(
        (status = 200, description = "내보내기 문서", body = ExportDocument)
    )
)]
pub async fn export_history(State(state): State<AppState>) -> impl IntoResponse {
    let document = state.history.export().await;
    tracing::info!(total_count = document.total_count, "기록 내보내기");

    (
        [(
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"prompt-history.json\"",
        )],
        Json(document),
    )
}

/// 기록 가져오기
///
/// 내보내기 문서를 받아 기존 기록 앞에 통째로 붙입니다. `prompts` 배열이
/// 없으면 실패하고 기존 기록은 변하지 않습니다.
#[utoipa::path(
    post,
    path = "/api/history/import",
    tag = "History",
    request_body = ExportDocument,
    responses(
        (status = 200, description = "가져오기 성공", body = ImportResponse),
        (status = 400, description = "문서 형식 오류", body = ErrorResponse)
    )
)]
pub async fn import_history(
    State(state): State<AppState>,
    document: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<BaseResponse<ImportResponse>>, AppError> {
    let Json(document) = document.map_err(AppError::from)?;
    let (imported_count, notice) = state.history.import(document).await?;
    tracing::info!(imported_count, "기록 가져오기 완료");

    Ok(Json(BaseResponse::success(ImportResponse {
        imported_count,
        total_count: state.history.len().await,
        notice,
    })))
}
