//! Request gate for protected routes.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::SESSION_COOKIE;
use crate::error::ApiError;
use crate::AppState;

use super::jwt;
use super::types::AuthSession;

/// Middleware that verifies the session cookie before a protected handler
/// runs.
///
/// Used with `axum::middleware::from_fn_with_state`. A request with no
/// session cookie is rejected before any cryptographic work happens; an
/// invalid or expired token is rejected after verification fails. Only when
/// verification succeeds does the handler run, with the decoded identity
/// attached to the request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = match extract_session_cookie(request.headers(), SESSION_COOKIE) {
        Some(token) => token,
        None => {
            tracing::debug!("Rejected request without session cookie");
            return ApiError::Unauthorized("Missing session cookie".to_string()).into_response();
        }
    };

    let claims = match jwt::verify(&token, &state.config.jwt_secret) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::warn!("Rejected session token: {}", e);
            return ApiError::Unauthorized("Invalid or expired token".to_string()).into_response();
        }
    };

    request.extensions_mut().insert(AuthSession { email: claims.sub });

    next.run(request).await
}

/// Pull the session token out of the request's `Cookie` header.
fn extract_session_cookie(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;

    for cookie_str in cookie_header.split(';') {
        if let Ok(cookie) = cookie::Cookie::parse(cookie_str.trim()) {
            if cookie.name() == cookie_name {
                return Some(cookie.value().to_string());
            }
        }
    }

    None
}
