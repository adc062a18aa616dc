//! Environment-driven configuration.

use anyhow::{bail, Context, Result};
use std::env;

use crate::auth::CookiePolicy;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "token";

/// Fixed session lifetime in hours. There is no re-issuance while a token
/// is live; an expired session requires a fresh sign-in.
pub const TOKEN_TTL_HOURS: i64 = 10;

/// Origin allowed when `CORS_ALLOWED_ORIGINS` is unset (local frontend dev
/// server).
const DEV_ORIGIN: &str = "http://localhost:5173";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub jwt_secret: String,
    pub cookie_policy: CookiePolicy,
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// `JWT_SECRET` is required and must be non-empty; issuing tokens
    /// signed with an empty secret would go unnoticed until verification
    /// elsewhere fails.
    pub fn from_env() -> Result<Self> {
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        if jwt_secret.trim().is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .context("PORT must be a valid port number")?;

        let production = env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false);

        let allowed_origins: Vec<String> = env::var("CORS_ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        // Credentialed CORS cannot fall back to a wildcard; when nothing is
        // configured, only the local dev origin is allowed.
        let allowed_origins = if allowed_origins.is_empty() {
            tracing::warn!(
                "CORS_ALLOWED_ORIGINS not set, allowing only {}",
                DEV_ORIGIN
            );
            vec![DEV_ORIGIN.to_string()]
        } else {
            allowed_origins
        };

        Ok(Self {
            port,
            jwt_secret,
            cookie_policy: CookiePolicy::for_environment(production),
            allowed_origins,
        })
    }

    /// Lifetime applied to both the token and its cookie.
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(TOKEN_TTL_HOURS)
    }
}

#[cfg(test)]
impl AppConfig {
    /// Config for in-process tests: development cookie policy, no real port.
    pub fn for_tests(secret: &str) -> Self {
        Self {
            port: 0,
            jwt_secret: secret.to_string(),
            cookie_policy: CookiePolicy::for_environment(false),
            allowed_origins: vec![DEV_ORIGIN.to_string()],
        }
    }
}
