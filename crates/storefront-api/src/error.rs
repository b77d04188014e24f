//! Maps domain `AppError` to HTTP responses.
//!
//! Client-facing messages are fixed per kind wherever the internal message
//! could leak why a request failed.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use storefront_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Wrapper so `AppError` can be returned from handlers.
///
/// `AppError` lives in `storefront-core`, which has no HTTP dependency.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AppError::validation(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(AppError::validation(format!(
            "Invalid query string: {}",
            rejection.body_text()
        )))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self(AppError::validation(format!(
            "Invalid path: {}",
            rejection.body_text()
        )))
    }
}

/// Handler result alias.
pub type ApiResult<T> = Result<T, ApiError>;

/// Status, code, and client-safe message for an error.
pub fn classify(err: &AppError) -> (StatusCode, &'static str, String) {
    match err.kind {
        ErrorKind::Authentication => (
            StatusCode::UNAUTHORIZED,
            "UNAUTHENTICATED",
            err.message.clone(),
        ),
        // Indistinguishable from any other authentication failure.
        ErrorKind::Revoked => (
            StatusCode::UNAUTHORIZED,
            "UNAUTHENTICATED",
            "Authentication required".to_string(),
        ),
        ErrorKind::Authorization => (StatusCode::FORBIDDEN, "FORBIDDEN", "Forbidden".to_string()),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", err.message.clone()),
        ErrorKind::Validation => (
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            err.message.clone(),
        ),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT", err.message.clone()),
        ErrorKind::ServiceUnavailable => (
            StatusCode::SERVICE_UNAVAILABLE,
            "SERVICE_UNAVAILABLE",
            "Service temporarily unavailable".to_string(),
        ),
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Configuration
        | ErrorKind::Serialization => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "Internal server error".to_string(),
        ),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, code, message) = classify(&err);

        if !err.kind.is_client_error() {
            tracing::error!(
                kind = %err.kind,
                error = %err.message,
                source = ?err.source,
                "Request failed"
            );
        }

        let body = ApiErrorResponse {
            error: code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
