use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use super::response::ErrorResponse;
use crate::storage::StorageError;

/// 애플리케이션 전역 에러 타입
///
/// 어떤 에러도 프로세스를 종료시키지 않는다. 원격 생성 실패는 로컬 폴백으로,
/// 영속화 실패는 사용자 알림으로 강등된다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// 저장된 API 키 없이 원격 생성 경로를 시도함
    MissingCredential,
    /// 네트워크 오류 또는 비성공 HTTP 상태
    TransportFailure(String),
    /// 원격 호출은 성공했지만 기대한 텍스트 필드가 없음
    MalformedResponse(String),
    /// 자동 생성 시작/발화 시점에 입력 문구가 비어 있음
    EmptyPhrase,
    /// 자동 생성이 이미 실행 중인데 다시 시작을 요청함
    CadenceAlreadyRunning,
    /// 영속 저장소 기록 실패 (재시도 이후에도)
    PersistenceFailed(String),
    /// 가져오기 문서에 기대한 구조가 없음
    MalformedImportDocument(String),
    BadRequest(String),
    NotFound(String),
    ValidationError(String),
    JsonParseFailed(String),
    InternalError(String),
}

impl AppError {
    /// 에러 메시지 반환
    pub fn message(&self) -> String {
        match self {
            AppError::MissingCredential => "Claude API 키가 설정되지 않았습니다.".to_string(),
            AppError::TransportFailure(msg) => format!("API 요청 실패: {}", msg),
            AppError::MalformedResponse(msg) => {
                format!("API 응답 형식이 올바르지 않습니다: {}", msg)
            }
            AppError::EmptyPhrase => "자동 생성에 사용할 문구가 비어 있습니다.".to_string(),
            AppError::CadenceAlreadyRunning => "자동 생성이 이미 실행 중입니다.".to_string(),
            AppError::PersistenceFailed(msg) => format!("기록 저장에 실패했습니다: {}", msg),
            AppError::MalformedImportDocument(msg) => {
                format!("가져오기 문서 형식이 올바르지 않습니다: {}", msg)
            }
            AppError::BadRequest(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::ValidationError(msg) => msg.clone(),
            AppError::JsonParseFailed(msg) => format!("잘못된 요청 형식입니다: {}", msg),
            AppError::InternalError(msg) => format!("서버 내부 에러: {}", msg),
        }
    }

    /// 에러 코드 반환
    pub fn error_code(&self) -> String {
        match self {
            AppError::MissingCredential => "GEN_001",
            AppError::TransportFailure(_) => "GEN_002",
            AppError::MalformedResponse(_) => "GEN_003",
            AppError::EmptyPhrase => "CAD_001",
            AppError::CadenceAlreadyRunning => "CAD_002",
            AppError::PersistenceFailed(_) => "HIST_001",
            AppError::MalformedImportDocument(_) => "HIST_002",
            AppError::BadRequest(_) => "COMMON400",
            AppError::NotFound(_) => "COMMON404",
            AppError::ValidationError(_) => "COMMON400",
            AppError::JsonParseFailed(_) => "COMMON400",
            AppError::InternalError(_) => "COMMON500",
        }
        .to_string()
    }

    /// HTTP 상태 코드 반환
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingCredential => StatusCode::UNAUTHORIZED,
            AppError::TransportFailure(_) => StatusCode::BAD_GATEWAY,
            AppError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            AppError::EmptyPhrase => StatusCode::BAD_REQUEST,
            AppError::CadenceAlreadyRunning => StatusCode::CONFLICT,
            AppError::PersistenceFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::MalformedImportDocument(_) => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::JsonParseFailed(_) => StatusCode::BAD_REQUEST,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.message();

        // 에러 로깅
        match &self {
            AppError::InternalError(_) | AppError::PersistenceFailed(_) => {
                error!(error_code = %error_code, "Internal Server Error: {}", message);
            }
            _ => {
                error!("Error [{}]: {}", error_code, message);
            }
        }

        let error_response = ErrorResponse::new(error_code, message);

        (status, Json(error_response)).into_response()
    }
}

/// JsonRejection을 AppError로 변환
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::JsonParseFailed(rejection.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationError(errors.to_string())
    }
}

impl From<StorageError> for AppError {
    fn from(error: StorageError) -> Self {
        AppError::PersistenceFailed(error.to_string())
    }
}

/// 편의 함수들
impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn internal_error(msg: impl Into<String>) -> Self {
        AppError::InternalError(msg.into())
    }

    pub fn validation_error(msg: impl Into<String>) -> Self {
        AppError::ValidationError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credential_should_map_to_gen_001() {
        let error = AppError::MissingCredential;

        assert_eq!(error.error_code(), "GEN_001");
        assert_eq!(error.status_code(), StatusCode::UNAUTHORIZED);
        assert!(error.message().contains("API 키"));
    }

    #[test]
    fn transport_failure_should_map_to_bad_gateway() {
        let error = AppError::TransportFailure("500 Internal Server Error".to_string());

        assert_eq!(error.error_code(), "GEN_002");
        assert_eq!(error.status_code(), StatusCode::BAD_GATEWAY);
        assert!(error.message().contains("API 요청 실패"));
    }

    #[test]
    fn malformed_response_should_be_distinct_from_transport_failure() {
        let transport = AppError::TransportFailure("timeout".to_string());
        let malformed = AppError::MalformedResponse("content[0].text 누락".to_string());

        assert_ne!(transport.error_code(), malformed.error_code());
    }

    #[test]
    fn empty_phrase_should_map_to_cad_001() {
        let error = AppError::EmptyPhrase;

        assert_eq!(error.error_code(), "CAD_001");
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn malformed_import_document_should_map_to_hist_002() {
        let error = AppError::MalformedImportDocument("prompts 배열이 없습니다".to_string());

        assert_eq!(error.error_code(), "HIST_002");
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn validation_errors_should_convert_to_common_400() {
        let error: AppError = AppError::validation_error("요청 문구는 필수입니다");

        assert_eq!(error.error_code(), "COMMON400");
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn storage_error_should_convert_to_persistence_failed() {
        let storage = StorageError::QuotaExceeded {
            size: 100,
            limit: 10,
        };

        let error: AppError = storage.into();

        assert_eq!(error.error_code(), "HIST_001");
    }
}
