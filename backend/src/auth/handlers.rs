//! Session endpoints: token issuance, logout, and the identity echo.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Extension, Json,
};
use shared::{AuthSessionResponse, IssueTokenRequest, IssueTokenResponse, LogoutResponse};

use crate::config::SESSION_COOKIE;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

use super::cookie::{clear_session_cookie, session_cookie};
use super::jwt;
use super::types::AuthSession;

/// Mint a session token for an identity and set it as the session cookie.
///
/// The email arrives from the upstream identity provider after it has
/// authenticated the user; by the time this endpoint is called the identity
/// is trusted. Calling it again for a signed-in identity is harmless: the
/// fresh cookie replaces the previous one.
pub async fn issue_token(
    State(state): State<AppState>,
    Json(payload): Json<IssueTokenRequest>,
) -> ApiResult<Response> {
    let ttl = state.config.token_ttl();
    let token =
        jwt::issue(&payload.email, &state.config.jwt_secret, ttl).map_err(ApiError::Signing)?;

    let cookie = session_cookie(SESSION_COOKIE, &token, ttl, &state.config.cookie_policy);

    tracing::info!("Issued session token for {}", payload.email);

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(IssueTokenResponse { success: true }),
    )
        .into_response())
}

/// Clear the session cookie.
///
/// Succeeds whether or not a session exists; signing out twice is not an
/// error.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let cookie = clear_session_cookie(SESSION_COOKIE, &state.config.cookie_policy);

    tracing::info!("Cleared session cookie");

    (
        [(header::SET_COOKIE, cookie)],
        Json(LogoutResponse { success: true }),
    )
}

/// Echo the verified identity back to a cookie-holding client.
///
/// Page script cannot read the HTTP-only cookie, so this is how a client
/// recovers the signed-in identity after a reload.
pub async fn me(Extension(session): Extension<AuthSession>) -> Json<AuthSessionResponse> {
    Json(AuthSessionResponse {
        email: session.email,
    })
}
