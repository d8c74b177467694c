use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Upload exceeds the size limit: {0}")]
    PayloadTooLarge(String),

    #[error("Invalid form submission ({status}): {message}")]
    InvalidForm { status: StatusCode, message: String },

    #[error("Upstream generation failed: {0}")]
    Upstream(#[from] LlmError),

    #[error("Upstream generation timed out after {0}s")]
    Timeout(u64),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                "MISSING_FIELD",
                format!("Missing required field '{field}'"),
            ),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg.clone())
            }
            AppError::InvalidForm { status, message } => {
                if status.is_server_error() {
                    tracing::error!("Form read failed: {message}");
                }
                (*status, "INVALID_FORM", message.clone())
            }
            AppError::Upstream(e) => {
                tracing::error!("Upstream generation error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UPSTREAM_FAILURE",
                    "Failed to generate a personal statement".to_string(),
                )
            }
            AppError::Timeout(secs) => {
                tracing::error!("Upstream generation timed out after {secs}s");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UPSTREAM_FAILURE",
                    "Failed to generate a personal statement".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "code": code,
        }));

        (status, body).into_response()
    }
}

impl AppError {
    /// Keeps the status axum assigned to a multipart failure.
    fn from_form_failure(status: StatusCode, message: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(message)
        } else {
            AppError::InvalidForm { status, message }
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::from_form_failure(e.status(), e.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(e: MultipartRejection) -> Self {
        AppError::from_form_failure(e.status(), e.body_text())
    }
}

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
    async fn test_missing_field_is_client_error() {
        let response = AppError::MissingField("jobUrl".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["code"], "MISSING_FIELD");
        assert_eq!(body["error"], "Missing required field 'jobUrl'");
    }

    #[tokio::test]
    async fn test_upstream_detail_is_not_exposed() {
        let err = AppError::Upstream(LlmError::Api {
            status: 403,
            message: "API key leaked-secret not valid".to_string(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["code"], "UPSTREAM_FAILURE");
        assert!(!body["error"].as_str().unwrap().contains("leaked-secret"));
    }

    #[tokio::test]
    async fn test_form_failure_keeps_axum_status() {
        let too_large =
            AppError::from_form_failure(StatusCode::PAYLOAD_TOO_LARGE, "too big".to_string());
        let response = too_large.into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body_json(response).await["code"], "PAYLOAD_TOO_LARGE");

        let malformed =
            AppError::from_form_failure(StatusCode::BAD_REQUEST, "bad boundary".to_string());
        let response = malformed.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["code"], "INVALID_FORM");
        assert_eq!(body["error"], "bad boundary");
    }

    #[tokio::test]
    async fn test_empty_content_maps_to_upstream_failure() {
        let response = AppError::from(LlmError::EmptyContent).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["code"], "UPSTREAM_FAILURE");
    }
}
