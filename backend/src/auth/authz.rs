//! Resource-ownership checks.
//!
//! Runs after the gate has verified the token: authentication says who the
//! caller is, this says what that identity may touch.

use crate::error::ApiError;

use super::types::AuthSession;

/// Allow the request only when the verified identity matches the identity
/// whose records it names.
///
/// An authenticated caller asking for someone else's records is a distinct
/// failure from a missing or bad token: 403, not 401.
pub fn require_owner(session: &AuthSession, requested_email: &str) -> Result<(), ApiError> {
    if session.email == requested_email {
        Ok(())
    } else {
        tracing::debug!(
            "Identity {} denied access to records of {}",
            session.email,
            requested_email
        );
        Err(ApiError::Forbidden(
            "Access restricted to the requesting identity".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(email: &str) -> AuthSession {
        AuthSession {
            email: email.to_string(),
        }
    }

    #[test]
    fn test_owner_allowed() {
        assert!(require_owner(&session("ada@example.com"), "ada@example.com").is_ok());
    }

    #[test]
    fn test_other_identity_forbidden() {
        let err = require_owner(&session("ada@example.com"), "grace@example.com")
            .expect_err("should deny");
        assert!(matches!(err, ApiError::Forbidden(_)));
    }

    #[test]
    fn test_comparison_is_exact() {
        // No case folding or trimming; identities are compared verbatim.
        let err =
            require_owner(&session("ada@example.com"), "Ada@example.com").expect_err("should deny");
        assert!(matches!(err, ApiError::Forbidden(_)));
    }
}
