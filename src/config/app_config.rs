use std::env;
use std::path::PathBuf;

use crate::storage::DEFAULT_QUOTA_BYTES;

/// 자동 생성 기본 주기 (초)
pub const DEFAULT_CADENCE_INTERVAL_SECS: u32 = 60;

/// 애플리케이션 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    /// 영속 상태 디렉터리 (자격 증명, 생성 기록)
    pub data_dir: PathBuf,
    /// 시작 시 사용할 Claude API 키. 저장소에 키가 있으면 그쪽이 우선한다.
    pub claude_api_key: Option<String>,
    /// 자동 생성 주기 (초)
    pub cadence_interval_secs: u32,
    /// 영속 값 하나의 크기 한도 (바이트)
    pub storage_quota_bytes: usize,
}

impl AppConfig {
    /// 환경 변수에서 설정 로드
    pub fn from_env() -> Result<Self, ConfigError> {
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let data_dir = PathBuf::from(env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()));

        let claude_api_key = env::var("CLAUDE_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        if claude_api_key.is_none() {
            tracing::warn!(
                "CLAUDE_API_KEY 환경변수가 설정되지 않았습니다. 키가 저장될 때까지 로컬 생성 경로만 사용합니다."
            );
        }

        let cadence_interval_secs = env::var("CADENCE_INTERVAL_SECS")
            .unwrap_or_else(|_| DEFAULT_CADENCE_INTERVAL_SECS.to_string())
            .parse()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or(ConfigError::InvalidCadenceInterval)?;

        let storage_quota_bytes = env::var("STORAGE_QUOTA_BYTES")
            .unwrap_or_else(|_| DEFAULT_QUOTA_BYTES.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidStorageQuota)?;

        Ok(Self {
            server_port,
            data_dir,
            claude_api_key,
            cadence_interval_secs,
            storage_quota_bytes,
        })
    }

    /// 테스트용 설정
    pub fn for_tests(claude_api_key: Option<&str>) -> Self {
        Self {
            server_port: 0,
            data_dir: PathBuf::from("data"),
            claude_api_key: claude_api_key.map(str::to_string),
            cadence_interval_secs: DEFAULT_CADENCE_INTERVAL_SECS,
            storage_quota_bytes: DEFAULT_QUOTA_BYTES,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
    #[error("Invalid cadence interval")]
    InvalidCadenceInterval,
    #[error("Invalid storage quota")]
    InvalidStorageQuota,
}
