pub mod config;
pub mod domain;
pub mod global;
pub mod state;
pub mod storage;
pub mod utils;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use domain::{cadence, generation, history, settings};

pub use config::AppConfig;
pub use domain::generation::client::{AiClient, AiClientTrait, ClaudeClient};
pub use state::AppState;
pub use utils::error::AppError;

use storage::{MemoryStateStore, SharedStateStore};

#[derive(OpenApi)]
#[openapi(
    paths(
        generation::handler::generate_random,
        generation::handler::generate_custom,
        generation::handler::generate_varied,
        history::handler::list_history,
        history::handler::delete_entry,
        history::handler::clear_history,
        history::handler::export_history,
        history::handler::import_history,
        settings::handler::get_settings,
        settings::handler::update_settings,
        settings::handler::save_credential,
        cadence::handler::start_cadence,
        cadence::handler::stop_cadence,
        cadence::handler::cadence_status,
    ),
    components(
        schemas(
            generation::dto::CustomPromptRequest,
            generation::dto::GenerationResponse,
            generation::dto::PromptSource,
            generation::engine::TargetEngine,
            history::dto::HistoryEntry,
            history::dto::ExportDocument,
            history::dto::HistoryListResponse,
            history::dto::DeleteEntryResponse,
            history::dto::ClearHistoryResponse,
            history::dto::ImportResponse,
            settings::dto::SettingsResponse,
            settings::dto::UpdateSettingsRequest,
            settings::dto::SaveCredentialRequest,
            settings::dto::CredentialResponse,
            cadence::dto::CadenceStatusResponse,
            utils::response::ErrorResponse,
        )
    ),
    tags(
        (name = "Prompt", description = "프롬프트 생성 API"),
        (name = "History", description = "생성 기록 API"),
        (name = "Settings", description = "설정 API"),
        (name = "Cadence", description = "자동 생성 API")
    )
)]
pub struct ApiDoc;

/// 라우터 구성
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(|| async { "OK" }))
        .route("/api/prompts/random", post(generation::handler::generate_random))
        .route("/api/prompts/custom", post(generation::handler::generate_custom))
        .route("/api/prompts/varied", post(generation::handler::generate_varied))
        .route(
            "/api/history",
            get(history::handler::list_history).delete(history::handler::clear_history),
        )
        .route("/api/history/export", get(history::handler::export_history))
        .route("/api/history/import", post(history::handler::import_history))
        .route("/api/history/:id", delete(history::handler::delete_entry))
        .route(
            "/api/settings",
            get(settings::handler::get_settings).put(settings::handler::update_settings),
        )
        .route(
            "/api/settings/credential",
            put(settings::handler::save_credential),
        )
        .route("/api/cadence", get(cadence::handler::cadence_status))
        .route("/api/cadence/start", post(cadence::handler::start_cadence))
        .route("/api/cadence/stop", post(cadence::handler::stop_cadence))
        .layer(middleware::from_fn(global::middleware::request_tracing))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 테스트용 라우터 생성
///
/// 인메모리 저장소와 Mock AI 클라이언트로 전체 라우터를 구성합니다.
/// `api_key`가 `None`이면 로컬 폴백 경로만 사용됩니다.
pub fn create_test_router_with_mock(
    api_key: Option<&str>,
    mock: impl AiClientTrait + 'static,
) -> Router {
    let config = AppConfig::for_tests(api_key);
    let store: SharedStateStore = Arc::new(MemoryStateStore::new());
    let state = AppState::new(config, store, Arc::new(mock));
    app(state)
}
