//! Error types for moodlist-server
//!
//! Every failure surfaces to the caller as exactly one structured
//! envelope `{"error": {"code", "message"}}` with a distinguishable
//! code. External-collaborator failures keep their diagnostic detail
//! (stderr, exit code, raw output) inside the envelope; unanticipated
//! internal errors are logged in full and surfaced generically.

use crate::services::{EngineError, InferenceError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Catalog filter engine failure (502/504)
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Inference sidecar failure (502)
    #[error(transparent)]
    Inference(#[from] InferenceError),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Generic error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<moodlist_common::Error> for ApiError {
    fn from(err: moodlist_common::Error) -> Self {
        match err {
            moodlist_common::Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Engine(ref err) => {
                let code = match err {
                    EngineError::NotFound(_) => "ENGINE_NOT_FOUND",
                    EngineError::Spawn(_) => "ENGINE_SPAWN_FAILED",
                    EngineError::Timeout(_) => "ENGINE_TIMEOUT",
                    EngineError::NonZeroExit { .. } => "ENGINE_FAILED",
                    EngineError::MalformedOutput { .. } => "ENGINE_OUTPUT",
                };
                let status = match err {
                    EngineError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
                    _ => StatusCode::BAD_GATEWAY,
                };
                (status, code, err.to_string())
            }
            ApiError::Inference(ref err) => {
                (StatusCode::BAD_GATEWAY, "INFERENCE_ERROR", err.to_string())
            }
            ApiError::Internal(ref msg) => {
                tracing::error!(detail = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An unexpected error occurred".to_string(),
                )
            }
            ApiError::Other(ref err) => {
                tracing::error!(detail = ?err, "Unhandled error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
