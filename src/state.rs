use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::domain::cadence::controller::CadenceController;
use crate::domain::generation::client::AiClient;
use crate::domain::generation::engine::TargetEngine;
use crate::domain::generation::service::PromptService;
use crate::domain::history::store::HistoryStore;
use crate::storage::{SharedStateStore, KEY_API_CREDENTIAL};

/// 기본 화면 비율
pub const DEFAULT_ASPECT_RATIO: &str = "16:9";

/// 세션 설정 — UI 협력자의 셀렉터 상태를 서버가 들고 있는다
///
/// 생성 시점마다 읽히고, 설정 API로만 바뀐다.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub aspect_ratio: String,
    pub engine: TargetEngine,
    /// 자동 생성이 발화 시점에 읽는 입력 문구
    pub phrase: String,
    /// 저장된 Claude API 키 (없으면 로컬 생성 경로만 사용)
    pub api_key: Option<String>,
}

impl SessionSettings {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            aspect_ratio: DEFAULT_ASPECT_RATIO.to_string(),
            engine: TargetEngine::default(),
            phrase: String::new(),
            api_key,
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key
            .as_deref()
            .map(|key| !key.trim().is_empty())
            .unwrap_or(false)
    }
}

pub type SharedSettings = Arc<RwLock<SessionSettings>>;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: SharedStateStore,
    pub settings: SharedSettings,
    pub history: Arc<HistoryStore>,
    pub prompt_service: Arc<PromptService>,
    pub cadence: Arc<CadenceController>,
}

impl AppState {
    /// 시작 시 한 번 구성되어 모든 컴포넌트를 소유한다
    ///
    /// 저장소에 키가 남아 있으면 환경 변수보다 우선한다.
    pub fn new(config: AppConfig, store: SharedStateStore, client: AiClient) -> Self {
        let stored_key = store
            .get(KEY_API_CREDENTIAL)
            .ok()
            .flatten()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        let api_key = stored_key.or_else(|| config.claude_api_key.clone());

        let settings: SharedSettings = Arc::new(RwLock::new(SessionSettings::new(api_key)));
        let history = Arc::new(HistoryStore::load(store.clone()));
        let prompt_service = Arc::new(PromptService::new(
            client,
            history.clone(),
            settings.clone(),
        ));
        let cadence = Arc::new(CadenceController::new(config.cadence_interval_secs));

        Self {
            config,
            store,
            settings,
            history,
            prompt_service,
            cadence,
        }
    }
}
