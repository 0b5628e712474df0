//! 자동 생성 주기 컨트롤러
//!
//! 두 개의 타이머를 소유한다: 고정 주기(기본 60초)마다 변주 생성 사이클을
//! 발화하는 생성 타이머와, 1초마다 남은 시간을 줄이는 카운트다운 타이머.
//! 카운트다운은 0에 닿거나 생성 사이클이 (수동이든 자동이든) 끝나면 주기
//! 값으로 되돌아간다.
//!
//! 발화 시점에 입력 문구가 비어 있으면 컨트롤러는 스스로 멈추고 이유를
//! 남긴다. 이전 사이클이 아직 진행 중인 틱은 버린다 — 진행 중인 원격
//! 호출 위에 새 호출을 겹치지 않는다. stop은 이후 발화만 막을 뿐, 이미
//! 나가 있는 원격 호출을 중단하지는 않는다.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::domain::generation::service::PromptService;
use crate::state::SharedSettings;
use crate::utils::error::AppError;

struct CadenceTasks {
    /// 이번 실행의 활성 플래그 — 재시작해도 이전 실행의 태스크에 영향이 없다
    run_active: Arc<AtomicBool>,
    generation: JoinHandle<()>,
    countdown: JoinHandle<()>,
}

pub struct CadenceController {
    interval_secs: u32,
    /// UI에 보이는 카운트다운 (초)
    countdown: Arc<AtomicU32>,
    tasks: Mutex<Option<CadenceTasks>>,
}

impl CadenceController {
    pub fn new(interval_secs: u32) -> Self {
        Self {
            interval_secs,
            countdown: Arc::new(AtomicU32::new(interval_secs)),
            tasks: Mutex::new(None),
        }
    }

    pub fn countdown(&self) -> u32 {
        self.countdown.load(Ordering::Relaxed)
    }

    pub fn is_running(&self) -> bool {
        self.tasks
            .lock()
            .unwrap()
            .as_ref()
            .map(|tasks| tasks.run_active.load(Ordering::Relaxed))
            .unwrap_or(false)
    }

    /// 카운트다운을 주기 값으로 되돌린다. 생성 사이클이 끝날 때마다 호출된다.
    pub fn reset_countdown(&self) {
        self.countdown.store(self.interval_secs, Ordering::Relaxed);
    }

    /// 자동 생성 시작
    ///
    /// 시작 시점에 입력 문구가 비어 있으면 타이머를 하나도 걸지 않고
    /// 거절한다. 이미 실행 중이면 역시 거절한다.
    pub async fn start(
        &self,
        service: Arc<PromptService>,
        settings: SharedSettings,
    ) -> Result<(), AppError> {
        let phrase_empty = settings.read().await.phrase.trim().is_empty();
        if phrase_empty {
            return Err(AppError::EmptyPhrase);
        }

        let mut slot = self.tasks.lock().unwrap();
        if slot
            .as_ref()
            .map(|tasks| tasks.run_active.load(Ordering::Relaxed))
            .unwrap_or(false)
        {
            return Err(AppError::CadenceAlreadyRunning);
        }

        let run_active = Arc::new(AtomicBool::new(true));
        self.reset_countdown();

        let generation = tokio::spawn(generation_loop(
            service,
            settings,
            run_active.clone(),
            self.countdown.clone(),
            self.interval_secs,
        ));
        let countdown = tokio::spawn(countdown_loop(
            run_active.clone(),
            self.countdown.clone(),
            self.interval_secs,
        ));

        *slot = Some(CadenceTasks {
            run_active,
            generation,
            countdown,
        });

        info!(interval_secs = self.interval_secs, "자동 생성 시작");
        Ok(())
    }

    /// 자동 생성 중지 — 두 타이머를 내리고 카운트다운을 되돌린다
    ///
    /// 실행 중이었는지 여부를 돌려준다.
    pub fn stop(&self) -> bool {
        let taken = self.tasks.lock().unwrap().take();
        let was_running = match taken {
            Some(tasks) => {
                let was_running = tasks.run_active.swap(false, Ordering::Relaxed);
                tasks.generation.abort();
                tasks.countdown.abort();
                was_running
            }
            None => false,
        };

        self.reset_countdown();
        if was_running {
            info!("자동 생성 중지");
        }
        was_running
    }
}

/// 주기마다 변주 생성 사이클을 발화하는 루프
async fn generation_loop(
    service: Arc<PromptService>,
    settings: SharedSettings,
    run_active: Arc<AtomicBool>,
    countdown: Arc<AtomicU32>,
    interval_secs: u32,
) {
    let mut ticker = tokio::time::interval(Duration::from_secs(u64::from(interval_secs)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // interval의 첫 틱은 즉시 발생하므로 소비한다
    ticker.tick().await;

    loop {
        ticker.tick().await;
        if !run_active.load(Ordering::Relaxed) {
            break;
        }

        let phrase = settings.read().await.phrase.trim().to_string();
        if phrase.is_empty() {
            warn!("자동 생성 중지: 발화 시점에 입력 문구가 비어 있음");
            run_active.store(false, Ordering::Relaxed);
            countdown.store(interval_secs, Ordering::Relaxed);
            break;
        }

        match service.try_generate_varied(&phrase).await {
            Some(outcome) => {
                info!(
                    entry_id = outcome.entry.id,
                    source = ?outcome.source,
                    "자동 생성 사이클 완료"
                );
                countdown.store(interval_secs, Ordering::Relaxed);
            }
            None => {
                warn!("이전 생성 사이클이 끝나지 않아 이번 틱을 버립니다");
            }
        }
    }
}

/// 1초마다 카운트다운을 줄이는 루프. 0에 닿으면 주기 값으로 되돌린다.
async fn countdown_loop(run_active: Arc<AtomicBool>, countdown: Arc<AtomicU32>, interval_secs: u32) {
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.tick().await;

    loop {
        ticker.tick().await;
        if !run_active.load(Ordering::Relaxed) {
            countdown.store(interval_secs, Ordering::Relaxed);
            break;
        }

        let remaining = countdown.load(Ordering::Relaxed);
        if remaining <= 1 {
            countdown.store(interval_secs, Ordering::Relaxed);
        } else {
            countdown.store(remaining - 1, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::generation::client::{AiClient, AiClientTrait};
    use crate::domain::history::store::HistoryStore;
    use crate::state::SessionSettings;
    use crate::storage::MemoryStateStore;
    use tokio::sync::RwLock;

    struct NoopClient;

    #[async_trait::async_trait]
    impl AiClientTrait for NoopClient {
        async fn complete(&self, _api_key: &str, _instruction: &str) -> Result<String, AppError> {
            Ok("generated".to_string())
        }
    }

    fn create_fixture(phrase: &str) -> (Arc<PromptService>, SharedSettings) {
        let client: AiClient = Arc::new(NoopClient);
        let history = Arc::new(HistoryStore::load(Arc::new(MemoryStateStore::new())));
        let mut session = SessionSettings::new(None);
        session.phrase = phrase.to_string();
        let settings: SharedSettings = Arc::new(RwLock::new(session));
        let service = Arc::new(PromptService::new(client, history, settings.clone()));
        (service, settings)
    }

    #[tokio::test]
    async fn start_should_refuse_empty_phrase_without_arming_timers() {
        // Arrange
        let controller = CadenceController::new(60);
        let (service, settings) = create_fixture("");

        // Act
        let result = controller.start(service, settings).await;

        // Assert
        assert_eq!(result.unwrap_err(), AppError::EmptyPhrase);
        assert!(!controller.is_running());
    }

    #[tokio::test]
    async fn start_should_refuse_double_start() {
        // Arrange
        let controller = CadenceController::new(60);
        let (service, settings) = create_fixture("파티");
        controller
            .start(service.clone(), settings.clone())
            .await
            .unwrap();

        // Act
        let second = controller.start(service, settings).await;

        // Assert
        assert_eq!(second.unwrap_err(), AppError::CadenceAlreadyRunning);
        controller.stop();
    }

    #[tokio::test]
    async fn stop_should_cancel_timers_and_reset_countdown() {
        // Arrange
        let controller = CadenceController::new(60);
        let (service, settings) = create_fixture("파티");
        controller.start(service, settings).await.unwrap();
        controller.countdown.store(3, Ordering::Relaxed);

        // Act
        let was_running = controller.stop();

        // Assert
        assert!(was_running);
        assert!(!controller.is_running());
        assert_eq!(controller.countdown(), 60);
    }

    #[tokio::test]
    async fn stop_without_start_should_report_not_running() {
        // Arrange
        let controller = CadenceController::new(60);

        // Act & Assert
        assert!(!controller.stop());
    }

    #[tokio::test]
    async fn restart_after_stop_should_succeed() {
        // Arrange
        let controller = CadenceController::new(60);
        let (service, settings) = create_fixture("파티");
        controller
            .start(service.clone(), settings.clone())
            .await
            .unwrap();
        controller.stop();

        // Act
        let restarted = controller.start(service, settings).await;

        // Assert
        assert!(restarted.is_ok());
        assert!(controller.is_running());
        controller.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn tick_should_generate_and_reset_countdown() {
        // Arrange — 2초 주기로 빠르게 돌린다
        let controller = CadenceController::new(2);
        let (service, settings) = create_fixture("파티");
        controller
            .start(service.clone(), settings)
            .await
            .unwrap();

        // Act — 한 주기 하고도 조금 지난 시점까지 진행
        tokio::time::sleep(Duration::from_millis(2_100)).await;

        // Assert
        assert!(
            service.history().len().await >= 1,
            "주기 발화로 기록이 쌓여야 한다"
        );
        controller.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn controller_should_stop_itself_when_phrase_becomes_empty() {
        // Arrange
        let controller = CadenceController::new(2);
        let (service, settings) = create_fixture("파티");
        controller
            .start(service.clone(), settings.clone())
            .await
            .unwrap();

        // Act — 다음 발화 전에 문구를 비운다
        settings.write().await.phrase.clear();
        tokio::time::sleep(Duration::from_millis(4_100)).await;

        // Assert — 스스로 멈추고 기록도 늘지 않는다
        assert!(!controller.is_running());
        assert_eq!(service.history().len().await, 0);
        assert_eq!(controller.countdown(), 2);
    }
}
