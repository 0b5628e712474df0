//! 원격 텍스트 생성 클라이언트
//!
//! Anthropic 메시지 API에 지시문을 보내고 첫 번째 응답 텍스트를 돌려준다.
//! 호출당 네트워크 시도는 정확히 한 번이고 내부 재시도는 없다. 재시도
//! 정책이 필요하면 호출자 몫이다.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::utils::error::AppError;

/// 메시지 API 엔드포인트
const MESSAGES_API_URL: &str = "https://api.anthropic.com/v1/messages";
/// 프로토콜 버전 태그 (고정)
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// 사용 모델
const MODEL_ID: &str = "claude-3-sonnet-20240229";
/// 응답 최대 토큰
const MAX_TOKENS: u32 = 1000;
/// 호출 타임아웃 (초)
const REQUEST_TIMEOUT_SECS: u64 = 25;

/// AI 클라이언트 인터페이스
///
/// 원격 호출을 추상화하여 테스트에서 Mock 객체로 대체할 수 있습니다.
/// 자격 증명 확인은 호출자(서비스) 책임이다 — 빈 키로는 이 인터페이스가
/// 호출되지 않아야 한다.
#[async_trait::async_trait]
pub trait AiClientTrait: Send + Sync {
    /// 지시문 하나로 완성 텍스트를 생성한다
    async fn complete(&self, api_key: &str, instruction: &str) -> Result<String, AppError>;
}

/// Arc로 래핑된 AiClient (Clone 지원)
pub type AiClient = Arc<dyn AiClientTrait>;

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<MessageParam<'a>>,
}

#[derive(Debug, Serialize)]
struct MessageParam<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

/// Anthropic 메시지 API 클라이언트 구현체
#[derive(Clone, Default)]
pub struct ClaudeClient {
    http: reqwest::Client,
}

impl ClaudeClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

/// 응답 본문에서 첫 번째 텍스트 블록을 꺼내 앞뒤 공백을 정리한다
fn extract_text(response: MessagesResponse) -> Result<String, AppError> {
    response
        .content
        .first()
        .and_then(|block| block.text.as_deref())
        .map(|text| text.trim().to_string())
        .ok_or_else(|| AppError::MalformedResponse("content[0].text 필드가 없습니다".to_string()))
}

#[async_trait::async_trait]
impl AiClientTrait for ClaudeClient {
    async fn complete(&self, api_key: &str, instruction: &str) -> Result<String, AppError> {
        let body = MessagesRequest {
            model: MODEL_ID,
            max_tokens: MAX_TOKENS,
            messages: vec![MessageParam {
                role: "user",
                content: instruction,
            }],
        };

        let response = self
            .http
            .post(MESSAGES_API_URL)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::TransportFailure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::TransportFailure(format!(
                "{} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("")
            )));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| AppError::MalformedResponse(e.to_string()))?;

        extract_text(parsed)
    }
}
