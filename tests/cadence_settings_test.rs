//! 설정/자동 생성 핸들러 테스트

use axum_test::TestServer;
use serde_json::json;

use mv_prompt_server::{create_test_router_with_mock, AiClientTrait, AppError};

struct MockAiClient;

#[async_trait::async_trait]
impl AiClientTrait for MockAiClient {
    async fn complete(&self, _api_key: &str, _instruction: &str) -> Result<String, AppError> {
        Ok("generated".to_string())
    }
}

fn create_server(api_key: Option<&str>) -> TestServer {
    TestServer::new(create_test_router_with_mock(api_key, MockAiClient)).unwrap()
}

mod settings {
    use super::*;

    #[tokio::test]
    async fn defaults_should_be_midjourney_16_9() {
        // Arrange
        let server = create_server(None);

        // Act
        let response = server.get("/api/settings").await;

        // Assert
        response.assert_status_ok();
        response.assert_json_contains(&json!({
            "result": {
                "aspectRatio": "16:9",
                "engine": "MIDJOURNEY",
                "phrase": "",
                "hasCredential": false
            }
        }));
    }

    #[tokio::test]
    async fn update_should_change_only_given_fields() {
        // Arrange
        let server = create_server(None);

        // Act
        let response = server
            .put("/api/settings")
            .json(&json!({ "aspectRatio": "1:1", "phrase": "파티" }))
            .await;

        // Assert — 엔진은 기본값 그대로
        response.assert_status_ok();
        response.assert_json_contains(&json!({
            "result": {
                "aspectRatio": "1:1",
                "engine": "MIDJOURNEY",
                "phrase": "파티"
            }
        }));
    }

    #[tokio::test]
    async fn update_should_reject_unknown_aspect_ratio() {
        // Arrange
        let server = create_server(None);

        // Act
        let response = server
            .put("/api/settings")
            .json(&json!({ "aspectRatio": "21:9" }))
            .await;

        // Assert
        response.assert_status_bad_request();
        response.assert_json_contains(&json!({ "code": "COMMON400" }));
    }

    #[tokio::test]
    async fn update_should_reject_unknown_engine() {
        // Arrange
        let server = create_server(None);

        // Act
        let response = server
            .put("/api/settings")
            .json(&json!({ "engine": "DALL_E" }))
            .await;

        // Assert
        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn startup_credential_should_be_reported_but_never_echoed() {
        // Arrange
        let server = create_server(Some("sk-startup-key"));

        // Act
        let response = server.get("/api/settings").await;

        // Assert
        let body: serde_json::Value = response.json();
        assert_eq!(body["result"]["hasCredential"], true);
        assert!(!body.to_string().contains("sk-startup-key"));
    }
}

mod credential {
    use super::*;

    #[tokio::test]
    async fn save_should_enable_remote_path() {
        // Arrange
        let server = create_server(None);

        // Act
        let response = server
            .put("/api/settings/credential")
            .json(&json!({ "apiKey": "sk-new-key" }))
            .await;

        // Assert
        response.assert_status_ok();
        response.assert_json_contains(&json!({ "result": { "hasCredential": true } }));

        // 키가 생겼으므로 생성은 AI 경로를 탄다
        let generated: serde_json::Value = server
            .post("/api/prompts/custom")
            .json(&json!({ "phrase": "파티" }))
            .await
            .json();
        assert_eq!(generated["result"]["source"], "AI");
    }

    #[tokio::test]
    async fn save_should_reject_empty_key() {
        // Arrange
        let server = create_server(None);

        // Act
        let response = server
            .put("/api/settings/credential")
            .json(&json!({ "apiKey": "" }))
            .await;

        // Assert
        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn save_should_reject_whitespace_only_key() {
        // Arrange
        let server = create_server(None);

        // Act
        let response = server
            .put("/api/settings/credential")
            .json(&json!({ "apiKey": "   " }))
            .await;

        // Assert
        response.assert_status_bad_request();
    }
}

mod cadence {
    use super::*;

    #[tokio::test]
    async fn status_should_start_stopped_with_full_countdown() {
        // Arrange
        let server = create_server(None);

        // Act
        let response = server.get("/api/cadence").await;

        // Assert
        response.assert_status_ok();
        response.assert_json_contains(&json!({
            "result": { "running": false, "countdown": 60 }
        }));
    }

    #[tokio::test]
    async fn start_should_be_refused_when_phrase_is_empty() {
        // Arrange
        let server = create_server(None);

        // Act
        let response = server.post("/api/cadence/start").await;

        // Assert — 타이머가 걸리지 않는다
        response.assert_status_bad_request();
        response.assert_json_contains(&json!({
            "isSuccess": false,
            "code": "CAD_001"
        }));

        let status: serde_json::Value = server.get("/api/cadence").await.json();
        assert_eq!(status["result"]["running"], false);
    }

    #[tokio::test]
    async fn start_should_arm_timers_when_phrase_is_set() {
        // Arrange
        let server = create_server(None);
        server
            .put("/api/settings")
            .json(&json!({ "phrase": "파티" }))
            .await
            .assert_status_ok();

        // Act
        let response = server.post("/api/cadence/start").await;

        // Assert
        response.assert_status_ok();
        response.assert_json_contains(&json!({ "result": { "running": true } }));

        let status: serde_json::Value = server.get("/api/cadence").await.json();
        assert_eq!(status["result"]["running"], true);

        server.post("/api/cadence/stop").await.assert_status_ok();
    }

    #[tokio::test]
    async fn double_start_should_conflict() {
        // Arrange
        let server = create_server(None);
        server
            .put("/api/settings")
            .json(&json!({ "phrase": "파티" }))
            .await
            .assert_status_ok();
        server.post("/api/cadence/start").await.assert_status_ok();

        // Act
        let second = server.post("/api/cadence/start").await;

        // Assert
        second.assert_status(axum::http::StatusCode::CONFLICT);
        second.assert_json_contains(&json!({ "code": "CAD_002" }));

        server.post("/api/cadence/stop").await.assert_status_ok();
    }

    #[tokio::test]
    async fn stop_should_reset_countdown_and_allow_restart() {
        // Arrange
        let server = create_server(None);
        server
            .put("/api/settings")
            .json(&json!({ "phrase": "파티" }))
            .await
            .assert_status_ok();
        server.post("/api/cadence/start").await.assert_status_ok();

        // Act
        let stopped = server.post("/api/cadence/stop").await;

        // Assert
        stopped.assert_status_ok();
        stopped.assert_json_contains(&json!({
            "result": { "running": false, "countdown": 60 }
        }));

        // 재시작도 가능해야 한다
        server.post("/api/cadence/start").await.assert_status_ok();
        server.post("/api/cadence/stop").await.assert_status_ok();
    }

    #[tokio::test]
    async fn manual_generation_should_reset_countdown() {
        // Arrange
        let server = create_server(None);

        // Act — 수동 생성 후 카운트다운은 주기 값으로 돌아간다
        server.post("/api/prompts/random").await.assert_status_ok();

        // Assert
        let status: serde_json::Value = server.get("/api/cadence").await.json();
        assert_eq!(status["result"]["countdown"], 60);
    }
}
