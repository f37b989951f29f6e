use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Downstream failures (database, generation, execution) all collapse to a
/// 500 with a static message; the detail only reaches the logs.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// `subject` names what was being generated in the client-facing message.
    #[error("Generation error ({subject}): {source}")]
    Generation {
        subject: &'static str,
        #[source]
        source: LlmError,
    },

    #[error("Execution error: {0}")]
    Execution(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "Error while processing your request".to_string(),
                )
            }
            AppError::Generation { subject, source } => {
                tracing::error!(kind = source.kind(), "Generation error ({subject}): {source}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "GENERATION_ERROR",
                    format!("Failed to generate {subject}"),
                )
            }
            AppError::Execution(msg) => {
                tracing::error!("Execution error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXECUTION_ERROR",
                    "Code execution failed".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

impl AppError {
    /// Adapter for `map_err`: tags an LLM failure with what was being generated.
    pub fn generation(subject: &'static str) -> impl FnOnce(LlmError) -> AppError {
        move |source| AppError::Generation { subject, source }
    }
}

// Extractor rejections are rendered in the same JSON envelope as every other
// client error instead of axum's plain-text defaults.

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::Validation(e.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_is_400_with_message() {
        let (status, body) = body_json(AppError::Validation("title is required".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "title is required");
    }

    #[tokio::test]
    async fn test_generation_failures_share_one_generic_body() {
        let subject = "industry insights";
        let (timeout_status, timeout_body) =
            body_json(AppError::generation(subject)(LlmError::Timeout)).await;
        let (invalid_status, invalid_body) =
            body_json(AppError::generation(subject)(LlmError::Invalid("min > max".into()))).await;

        assert_eq!(timeout_status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(invalid_status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(timeout_body, invalid_body);
        assert!(!invalid_body.to_string().contains("min > max"));
        assert_eq!(
            invalid_body["error"]["message"],
            "Failed to generate industry insights"
        );
    }

    #[tokio::test]
    async fn test_internal_detail_is_not_leaked() {
        let (status, body) =
            body_json(AppError::Internal(anyhow::anyhow!("connection refused at 10.0.0.4"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.to_string().contains("10.0.0.4"));
    }
}
