//! Unified error handling for the backend API.
//!
//! Provides a centralized error type that implements `IntoResponse`, so
//! handlers can use `?` and still produce the right HTTP status with a
//! consistent JSON body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::ErrorResponse;
use thiserror::Error;

/// Unified error type for API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No token, or a token that failed verification. The caller has to
    /// sign in again; no other recovery applies.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Verified session asking for another identity's resources.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("{0} not found")]
    NotFound(String),

    /// Token could not be signed. Server-side misconfiguration, fatal to
    /// the issuance request.
    #[error("Token signing failed")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// Store or other internal failure.
    #[error("Internal error: {0}")]
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        ApiError::NotFound(resource.into())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            ApiError::NotFound(resource) => {
                (StatusCode::NOT_FOUND, format!("{} not found", resource))
            }
            ApiError::Signing(e) => {
                tracing::error!("Token signing failed: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Token signing failed".to_string(),
                )
            }
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
            details: None,
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
