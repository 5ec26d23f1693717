/*
 * Responsibility
 * - Shared AppError for the HTTP surface
 * - IntoResponse (HTTP status / JSON error body)
 * - Convert service errors (token issuing, seeds) into AppError
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::csrf::{GeneratorError, ValidatorError};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("csrf token rejected")]
    CsrfForbidden,
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::BadRequest { code, message } => (StatusCode::BAD_REQUEST, code, message),
            AppError::CsrfForbidden => (
                StatusCode::FORBIDDEN,
                "CSRF_FORBIDDEN",
                "missing or invalid csrf token".into(),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "internal server error".into(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidatorError> for AppError {
    fn from(e: ValidatorError) -> Self {
        match e {
            // No session seed: the client has no session to bind a token to
            ValidatorError::MissingSeed => {
                AppError::bad_request("SESSION_REQUIRED", "no csrf session")
            }
            ValidatorError::Backend(_) => AppError::Internal,
        }
    }
}

impl From<GeneratorError> for AppError {
    fn from(_: GeneratorError) -> Self {
        AppError::Internal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn to_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn csrf_forbidden_is_403() {
        let (status, body) = to_json(AppError::CsrfForbidden).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], "CSRF_FORBIDDEN");
    }

    #[tokio::test]
    async fn bad_request_keeps_code_and_message() {
        let (status, body) = to_json(AppError::bad_request("INVALID_PATH", "bad path")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_PATH");
        assert_eq!(body["error"]["message"], "bad path");
    }

    #[tokio::test]
    async fn validator_errors_map() {
        let (status, _) = to_json(ValidatorError::MissingSeed.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = to_json(ValidatorError::Backend("x".into()).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
