//! Session token creation and validation.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use super::types::Claims;

/// Sign a session token for an identity.
///
/// The token is bound to `email` and expires exactly `ttl` after issuance.
pub fn issue(
    email: &str,
    secret: &str,
    ttl: Duration,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();

    let claims = Claims {
        sub: email.to_string(),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify a session token's signature and expiration, returning its claims.
pub fn verify(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    // No leeway: a token is rejected the moment its lifetime has elapsed.
    let mut validation = Validation::default();
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-for-testing-only";

    #[test]
    fn test_issue_and_verify() {
        let token =
            issue("test@example.com", SECRET, Duration::hours(10)).expect("should issue token");
        let claims = verify(&token, SECRET).expect("should verify token");

        assert_eq!(claims.sub, "test@example.com");
        assert_eq!(claims.exp - claims.iat, 10 * 3600);
    }

    #[test]
    fn test_expired_token_rejected() {
        let token =
            issue("test@example.com", SECRET, Duration::hours(-1)).expect("should issue token");
        assert!(verify(&token, SECRET).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token =
            issue("test@example.com", SECRET, Duration::hours(10)).expect("should issue token");
        assert!(verify(&token, "a-different-secret").is_err());
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let token =
            issue("test@example.com", SECRET, Duration::hours(10)).expect("should issue token");

        // Alter one character of the payload segment; the signature no
        // longer matches.
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        assert_eq!(parts.len(), 3);
        let flipped = if parts[1].starts_with('e') { "f" } else { "e" };
        parts[1].replace_range(0..1, flipped);
        let tampered = parts.join(".");

        assert!(verify(&tampered, SECRET).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(verify("not-a-token", SECRET).is_err());
        assert!(verify("", SECRET).is_err());
    }
}
