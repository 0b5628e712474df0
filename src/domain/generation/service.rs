//! 프롬프트 생성 오케스트레이션
//!
//! 생성 요청 하나의 흐름: 모드 결정 (커스텀/랜덤) → 키가 있으면 원격 생성
//! 시도 → 실패하면 사전 치환·템플릿 폴백 → 기록 저장. 요청은 단일 비행
//! 락 아래에서 한 번에 하나씩 끝까지 처리된다.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::client::AiClient;
use super::dto::PromptSource;
use super::engine::EngineProfile;
use super::instruction;
use super::template;
use super::translate::translate_korean_to_english;
use crate::domain::history::dto::HistoryEntry;
use crate::domain::history::store::{AppendOutcome, HistoryStore};
use crate::state::{SessionSettings, SharedSettings};
use crate::utils::error::AppError;

/// 생성 사이클 하나의 결과
pub struct GenerationOutcome {
    pub entry: HistoryEntry,
    pub source: PromptSource,
    /// 폴백·영속화 관련 사용자 알림
    pub notice: Option<String>,
}

pub struct PromptService {
    client: AiClient,
    history: Arc<HistoryStore>,
    settings: SharedSettings,
    /// 생성 사이클 단일 비행 락 — 케이던스 틱은 try_lock으로 겹침을 막는다
    in_flight: Mutex<()>,
}

impl PromptService {
    pub fn new(client: AiClient, history: Arc<HistoryStore>, settings: SharedSettings) -> Self {
        Self {
            client,
            history,
            settings,
            in_flight: Mutex::new(()),
        }
    }

    /// 랜덤 생성 — 문구 없이 템플릿/AI로 새 프롬프트를 만든다
    pub async fn generate_random(&self) -> GenerationOutcome {
        let _guard = self.in_flight.lock().await;
        self.run_cycle(None, None).await
    }

    /// 커스텀 생성 — 사용자 문구를 반영한다
    pub async fn generate_custom(&self, phrase: &str) -> GenerationOutcome {
        let _guard = self.in_flight.lock().await;
        self.run_cycle(Some(phrase), None).await
    }

    /// 변주 생성 — 창작 방향 힌트를 섞어 연속 사이클의 반복을 줄인다
    pub async fn generate_varied(&self, phrase: &str) -> GenerationOutcome {
        let _guard = self.in_flight.lock().await;
        let hint = pick_hint();
        self.run_cycle(Some(phrase), Some(hint)).await
    }

    /// 케이던스 틱 전용 변주 생성
    ///
    /// 이전 사이클이 아직 진행 중이면 `None`을 돌려주고 틱을 버린다.
    pub async fn try_generate_varied(&self, phrase: &str) -> Option<GenerationOutcome> {
        let _guard = match self.in_flight.try_lock() {
            Ok(guard) => guard,
            Err(_) => return None,
        };
        let hint = pick_hint();
        Some(self.run_cycle(Some(phrase), Some(hint)).await)
    }

    async fn run_cycle(&self, phrase: Option<&str>, hint: Option<&str>) -> GenerationOutcome {
        let settings = self.settings.read().await.clone();
        let profile = settings.engine.profile();

        let (prompt, source, fallback_notice) =
            match self.attempt_remote(&settings, profile, phrase, hint).await {
                Ok(text) => {
                    info!(mode = mode_name(phrase), "AI 프롬프트 생성 완료");
                    (text, PromptSource::Ai, None)
                }
                Err(AppError::MissingCredential) => {
                    // 키가 없을 때는 로컬 경로가 정상 동작이므로 알림 없음
                    debug!(mode = mode_name(phrase), "API 키 미설정, 로컬 생성 경로 사용");
                    (
                        self.compose_local(&settings, profile, phrase),
                        PromptSource::Fallback,
                        None,
                    )
                }
                Err(err) => {
                    warn!(mode = mode_name(phrase), error = %err, "AI 생성 실패, 로컬 생성으로 대체");
                    let notice = match phrase {
                        Some(_) => "AI 생성 실패, 기본 번역을 사용합니다.",
                        None => "AI 생성 실패, 기본 프롬프트를 사용합니다.",
                    };
                    (
                        self.compose_local(&settings, profile, phrase),
                        PromptSource::Fallback,
                        Some(notice.to_string()),
                    )
                }
            };

        let AppendOutcome {
            entry,
            persist_notice,
        } = self
            .history
            .append(prompt, phrase.map(str::to_string), &settings.aspect_ratio)
            .await;

        let notice = match (fallback_notice, persist_notice) {
            (Some(fallback), Some(persist)) => Some(format!("{} {}", fallback, persist)),
            (fallback, persist) => fallback.or(persist),
        };

        GenerationOutcome {
            entry,
            source,
            notice,
        }
    }

    /// 원격 생성 시도 — 자격 증명이 없으면 네트워크 호출 없이 즉시 실패한다
    async fn attempt_remote(
        &self,
        settings: &SessionSettings,
        profile: &EngineProfile,
        phrase: Option<&str>,
        hint: Option<&str>,
    ) -> Result<String, AppError> {
        let api_key = settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(AppError::MissingCredential)?;

        let instruction = match phrase {
            Some(phrase) => {
                instruction::custom_instruction(profile, phrase, &settings.aspect_ratio, hint)
            }
            None => instruction::random_instruction(profile, &settings.aspect_ratio, hint),
        };

        self.client.complete(api_key, &instruction).await
    }

    /// 기록 저장소 참조
    pub fn history(&self) -> &Arc<HistoryStore> {
        &self.history
    }

    /// 로컬 폴백 프롬프트 조합 — 힌트는 여기에 영향을 주지 않는다
    fn compose_local(
        &self,
        settings: &SessionSettings,
        profile: &EngineProfile,
        phrase: Option<&str>,
    ) -> String {
        match phrase {
            Some(phrase) => template::compose_custom(
                &translate_korean_to_english(phrase),
                profile,
                &settings.aspect_ratio,
            ),
            None => {
                let mut rng = rand::thread_rng();
                template::compose_random(
                    &mut rng,
                    &template::DEFAULT_POOLS,
                    profile,
                    &settings.aspect_ratio,
                )
            }
        }
    }
}

fn pick_hint() -> &'static str {
    let mut rng = rand::thread_rng();
    instruction::pick_variety_hint(&mut rng)
}

fn mode_name(phrase: Option<&str>) -> &'static str {
    match phrase {
        Some(_) => "custom",
        None => "random",
    }
}
