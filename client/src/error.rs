//! Client-side error taxonomy.

use thiserror::Error;

/// Errors surfaced by the API client and the session driver.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Base URL or path could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(String),

    /// Transport-level failure before any HTTP status was produced.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// 401: the server saw no valid session cookie.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 403: the session is valid but named another identity's resources.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Any other non-success response.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl ClientError {
    /// True for the terminal authentication failures that end the session.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            ClientError::Unauthorized(_) | ClientError::Forbidden(_)
        )
    }
}
