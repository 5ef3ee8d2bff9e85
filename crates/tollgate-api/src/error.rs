//! Maps domain `AppError` to HTTP responses.
//!
//! Clients see a fixed message per kind. Unknown identifiers and wrong
//! passwords render byte-identical responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use tollgate_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Handler error: an [`AppError`] on its way to the client.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Status, code and client-facing message for this error.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        let err = &self.0;
        match err.kind {
            ErrorKind::Malformed => (
                StatusCode::UNAUTHORIZED,
                "TOKEN_MALFORMED",
                "Invalid token".into(),
            ),
            ErrorKind::SignatureInvalid => (
                StatusCode::UNAUTHORIZED,
                "TOKEN_SIGNATURE_INVALID",
                "Invalid token signature".into(),
            ),
            ErrorKind::Expired => (
                StatusCode::UNAUTHORIZED,
                "TOKEN_EXPIRED",
                "Token has expired".into(),
            ),
            ErrorKind::Revoked => (
                StatusCode::UNAUTHORIZED,
                "TOKEN_REVOKED",
                "Token has been revoked".into(),
            ),
            ErrorKind::InvalidCredentials | ErrorKind::NotFound => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Invalid email or password".into(),
            ),
            ErrorKind::InvalidAuthScheme => (
                StatusCode::UNAUTHORIZED,
                "INVALID_AUTH_SCHEME",
                err.message.clone(),
            ),
            ErrorKind::StoreUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                "Service temporarily unavailable".into(),
            ),
            ErrorKind::Validation => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                err.message.clone(),
            ),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT", err.message.clone()),
            ErrorKind::Database
            | ErrorKind::Configuration
            | ErrorKind::Serialization
            | ErrorKind::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error".into(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        if status.is_server_error() {
            error!(kind = %self.0.kind, error = %self.0.message, "Request failed");
        } else if self.0.is_token_rejection() {
            warn!(kind = %self.0.kind, "Token rejected");
        }

        let body = ApiErrorResponse {
            error: code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
