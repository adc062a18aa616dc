//! Cookie-session authentication.
//!
//! This module provides:
//! - Session token creation and validation (HS256, fixed lifetime)
//! - HTTP-only session cookie construction for both deployment environments
//! - `require_auth` middleware gating protected routes
//! - `require_owner` identity-equality authorization
//! - Handlers for token issuance, logout, and the identity echo

mod authz;
mod cookie;
mod handlers;
mod jwt;
mod middleware;
pub mod types;

pub use authz::require_owner;
pub use cookie::{clear_session_cookie, session_cookie, CookiePolicy};
pub use handlers::{issue_token, logout, me};
pub use jwt::{issue, verify};
pub use middleware::require_auth;
