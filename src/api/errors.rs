//! API error types mapped to HTTP status codes.
//!
//! Every variant renders as a JSON body `{"error": "message"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::error::HadithError;

#[derive(Debug)]
pub enum ApiError {
    /// Malformed path or parameter (400).
    BadRequest(String),
    /// No such record (404).
    NotFound(String),
    /// Search deadline exceeded (503).
    ServiceUnavailable(String),
    /// Unexpected server error (500).
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

impl From<HadithError> for ApiError {
    fn from(err: HadithError) -> Self {
        match err {
            HadithError::HadithNotFound { .. } => Self::NotFound(err.to_string()),
            HadithError::InvalidArgument(msg) => Self::BadRequest(msg),
            HadithError::Timeout(_) => Self::ServiceUnavailable(err.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}
