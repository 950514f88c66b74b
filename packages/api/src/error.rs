// ABOUTME: API error type and its mapping onto HTTP responses
// ABOUTME: Every failure leaves as the standard envelope with a code and request id

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dayboard_ai::SummaryError;
use dayboard_auth::AuthError;
use dayboard_core::ValidationError;
use dayboard_storage::StorageError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

/// Main application error type that all handlers return
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Email already registered")]
    EmailTaken,

    #[error("{0}")]
    Unauthorized(String),

    #[error("Resource not found")]
    NotFound,

    #[error("AI summaries are not configured")]
    AiUnavailable,

    #[error("AI service error: {0}")]
    Ai(#[from] SummaryError),

    /// Raw driver messages are surfaced to callers
    #[error("{0}")]
    Storage(StorageError),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Error envelope: `{ success: false, data: null, error, code, requestId }`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    success: bool,
    data: Option<()>,
    error: String,
    code: &'static str,
    request_id: String,
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    fn to_status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::EmailTaken => (StatusCode::BAD_REQUEST, "EMAIL_TAKEN"),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AppError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::AiUnavailable => (StatusCode::SERVICE_UNAVAILABLE, "AI_UNAVAILABLE"),
            AppError::Ai(_) => (StatusCode::BAD_GATEWAY, "AI_ERROR"),
            AppError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound => AppError::NotFound,
            StorageError::DuplicateEmail(_) => AppError::EmailTaken,
            other => AppError::Storage(other),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::WeakPassword(_) | AuthError::InvalidEmail(_) => {
                AppError::Validation(err.to_string())
            }
            AuthError::InvalidCredentials
            | AuthError::TokenExpired
            | AuthError::InvalidToken(_) => AppError::Unauthorized(err.to_string()),
            AuthError::Hashing(_) | AuthError::Configuration(_) => {
                AppError::Internal(anyhow::anyhow!(err.to_string()))
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        let (status, code) = self.to_status_and_code();

        if status.is_server_error() {
            error!(
                request_id = %request_id,
                error_code = %code,
                error = %self,
                "Server error"
            );
        } else {
            info!(
                request_id = %request_id,
                error_code = %code,
                error = %self,
                "API error response"
            );
        }

        let body = ErrorResponse {
            success: false,
            data: None,
            error: self.to_string(),
            code,
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_envelope() {
        let response = AppError::from(StorageError::NotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert!(body["data"].is_null());
        assert_eq!(body["code"], "NOT_FOUND");
        assert!(body["requestId"].is_string());
    }

    #[tokio::test]
    async fn test_duplicate_email_maps_to_bad_request() {
        let response =
            AppError::from(StorageError::DuplicateEmail("a@b.co".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["code"], "EMAIL_TAKEN");
        assert!(body["error"].as_str().unwrap().contains("already registered"));
    }

    #[test]
    fn test_auth_error_mapping() {
        assert!(matches!(
            AppError::from(AuthError::TokenExpired),
            AppError::Unauthorized(_)
        ));
        assert!(matches!(
            AppError::from(AuthError::WeakPassword("short".into())),
            AppError::Validation(_)
        ));
    }

    #[test]
    fn test_ai_errors_are_not_server_faults_of_ours() {
        let (status, _) = AppError::AiUnavailable.to_status_and_code();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
