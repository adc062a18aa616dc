//! Session cookie construction.
//!
//! The token travels exclusively in an HTTP-only cookie: page script can
//! never read it, and the browser resends it on its own with credentialed
//! requests.

use cookie::SameSite;

/// Cookie attributes that depend on where the backend is deployed.
///
/// `HttpOnly` is invariant. A cross-site production deployment needs
/// `Secure; SameSite=None` for the browser to send the cookie at all;
/// same-site local development runs over plain HTTP and uses
/// `SameSite=Strict` without `Secure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookiePolicy {
    pub secure: bool,
    pub same_site: SameSite,
}

impl CookiePolicy {
    pub fn for_environment(production: bool) -> Self {
        if production {
            Self {
                secure: true,
                same_site: SameSite::None,
            }
        } else {
            Self {
                secure: false,
                same_site: SameSite::Strict,
            }
        }
    }

    fn secure_suffix(&self) -> &'static str {
        if self.secure {
            "; Secure"
        } else {
            ""
        }
    }
}

/// Build the session `Set-Cookie` value carrying a freshly issued token.
pub fn session_cookie(
    name: &str,
    token: &str,
    ttl: chrono::Duration,
    policy: &CookiePolicy,
) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite={}; Max-Age={}{}",
        name,
        token,
        policy.same_site,
        ttl.num_seconds(),
        policy.secure_suffix()
    )
}

/// Build the `Set-Cookie` value that clears the session.
///
/// Attributes must match the ones the session cookie was set with, or the
/// browser treats it as a different cookie and keeps the old one.
pub fn clear_session_cookie(name: &str, policy: &CookiePolicy) -> String {
    format!(
        "{}=; Path=/; HttpOnly; SameSite={}; Max-Age=0{}",
        name,
        policy.same_site,
        policy.secure_suffix()
    )
}
