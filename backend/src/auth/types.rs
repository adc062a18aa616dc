//! Auth-related types.

use serde::{Deserialize, Serialize};

/// Claims carried by the session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the authenticated identity's email
    pub sub: String,
    /// Issued-at timestamp (unix seconds)
    pub iat: i64,
    /// Expiration timestamp (unix seconds)
    pub exp: i64,
}

/// Verified identity attached to a request by the auth gate.
///
/// Lives in the request extensions for exactly one request; nothing about
/// the verification outlives the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub email: String,
}
