use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// A single field bound the request broke.
#[derive(Debug, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: String) -> Self {
        FieldViolation { field, message }
    }
}

/// Request-level failures. Each kind maps to its own status so callers can
/// tell a bad payload from a server-side fault.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request validation failed")]
    Validation(Vec<FieldViolation>),
    #[error("feature encoding failed: {0}")]
    Encoding(String),
    #[error("model inference failed: {0}")]
    Inference(String),
}

impl From<Vec<FieldViolation>> for ApiError {
    fn from(violations: Vec<FieldViolation>) -> Self {
        ApiError::Validation(violations)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Validation(violations) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "detail": violations }),
            ),
            ApiError::Encoding(_) => (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() })),
            ApiError::Inference(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": self.to_string() }),
            ),
        };
        (status, Json(body)).into_response()
    }
}
