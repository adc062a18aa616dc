//! Session lifecycle driver.
//!
//! Bridges identity-provider events to token issuance and cookie clearing,
//! and tears the session down when a protected call comes back rejected.

use tokio::sync::mpsc;

use shared::JobApplication;

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::session::{SessionState, SessionWatch, SignOutCause};

/// Identity-provider events the driver consumes.
///
/// The provider itself is external; by the time an event arrives here the
/// identity is already authenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityEvent {
    SignedIn { email: String },
    SignedOut,
}

/// Drives the session in response to identity changes and rejected calls.
///
/// Cloneable; all clones share one cookie store and one session watch.
#[derive(Debug, Clone)]
pub struct SessionDriver {
    api: ApiClient,
    watch: SessionWatch,
}

impl SessionDriver {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            watch: SessionWatch::new(),
        }
    }

    /// The observable session state holder.
    pub fn watch(&self) -> &SessionWatch {
        &self.watch
    }

    /// Request a session token for `email`, waiting for the cookie to be
    /// placed before reporting the session active.
    ///
    /// Safe to call redundantly: the ambient identity listener and an
    /// interactive sign-in may both request issuance for the same identity,
    /// and the fresh cookie simply replaces the previous one.
    pub async fn establish(&self, email: &str) -> Result<(), ClientError> {
        match self.api.issue_token(email).await {
            Ok(()) => {
                tracing::info!("Session established for {}", email);
                self.watch.publish(SessionState::Active {
                    email: email.to_string(),
                });
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to establish session for {}: {}", email, e);
                Err(e)
            }
        }
    }

    /// Clear the session cookie, waiting for the acknowledgement before
    /// reporting the session gone.
    pub async fn teardown(&self) -> Result<(), ClientError> {
        match self.api.logout().await {
            Ok(()) => {
                tracing::info!("Session torn down");
                self.watch.publish(SessionState::SignedOut {
                    cause: SignOutCause::UserRequested,
                });
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to tear down session: {}", e);
                Err(e)
            }
        }
    }

    /// Fetch the caller's applications through the session cookie.
    ///
    /// A rejection is terminal for this session: the local state is expired
    /// with a single notification and the error is returned without a
    /// retry. Transport and other failures pass through untouched.
    pub async fn fetch_job_applications(
        &self,
        email: &str,
    ) -> Result<Vec<JobApplication>, ClientError> {
        match self.api.list_job_applications(email).await {
            Ok(applications) => Ok(applications),
            Err(e) if e.is_auth_failure() => {
                self.expire(&e).await;
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Consume identity-provider events until the channel closes.
    ///
    /// Failures are logged and reflected in the session watch; the loop
    /// keeps consuming either way.
    pub async fn drive(&self, mut events: mpsc::Receiver<IdentityEvent>) {
        while let Some(event) = events.recv().await {
            match event {
                IdentityEvent::SignedIn { email } => {
                    if self.establish(&email).await.is_err() {
                        tracing::warn!("Sign-in for {} did not produce a session", email);
                    }
                }
                IdentityEvent::SignedOut => {
                    if self.teardown().await.is_err() {
                        tracing::warn!("Sign-out did not clear the session cookie");
                    }
                }
            }
        }
    }

    /// End the session after a rejected protected call.
    ///
    /// Clearing the cookie is best-effort; the sign-out state is published
    /// regardless, and subscribers react to that.
    async fn expire(&self, cause: &ClientError) {
        tracing::warn!("Protected call rejected ({}), signing out", cause);
        if let Err(e) = self.api.logout().await {
            tracing::warn!("Clearing the session cookie failed: {}", e);
        }
        self.watch.publish(SessionState::SignedOut {
            cause: SignOutCause::AuthFailure,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Query, State},
        http::{header, HeaderMap, StatusCode},
        response::{IntoResponse, Response},
        routing::{get, post},
        Json, Router,
    };
    use shared::{ErrorResponse, IssueTokenRequest, IssueTokenResponse, LogoutResponse};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const ADA: &str = "ada@example.com";
    const GRACE: &str = "grace@example.com";

    #[derive(Clone, Default)]
    struct StubCounters {
        logouts: Arc<AtomicUsize>,
        application_calls: Arc<AtomicUsize>,
    }

    /// Minimal stand-in for the backend. The cookie value doubles as the
    /// verified identity, which is all the driver semantics need.
    fn stub_router(counters: StubCounters) -> Router {
        Router::new()
            .route("/jwt", post(stub_issue))
            .route("/logout", post(stub_logout))
            .route("/job-applications", get(stub_applications))
            .with_state(counters)
    }

    async fn stub_issue(Json(body): Json<IssueTokenRequest>) -> impl IntoResponse {
        (
            [(header::SET_COOKIE, format!("token={}; Path=/", body.email))],
            Json(IssueTokenResponse { success: true }),
        )
    }

    async fn stub_logout(State(counters): State<StubCounters>) -> impl IntoResponse {
        counters.logouts.fetch_add(1, Ordering::SeqCst);
        (
            [(header::SET_COOKIE, "token=; Path=/; Max-Age=0".to_string())],
            Json(LogoutResponse { success: true }),
        )
    }

    async fn stub_applications(
        State(counters): State<StubCounters>,
        headers: HeaderMap,
        Query(params): Query<HashMap<String, String>>,
    ) -> Response {
        counters.application_calls.fetch_add(1, Ordering::SeqCst);

        let identity = headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|cookies| {
                cookies.split(';').find_map(|pair| {
                    pair.trim().strip_prefix("token=").map(str::to_string)
                })
            })
            .filter(|token| !token.is_empty());

        let Some(identity) = identity else {
            return (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "Missing session cookie".to_string(),
                    details: None,
                }),
            )
                .into_response();
        };

        let requested = params.get("email").cloned().unwrap_or_default();
        if requested != identity {
            return (
                StatusCode::FORBIDDEN,
                Json(ErrorResponse {
                    error: "Access restricted to the requesting identity".to_string(),
                    details: None,
                }),
            )
                .into_response();
        }

        Json(Vec::<JobApplication>::new()).into_response()
    }

    async fn spawn_stub() -> (String, StubCounters) {
        let counters = StubCounters::default();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("should bind stub listener");
        let addr = listener.local_addr().expect("should read local addr");

        let app = stub_router(counters.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub should serve");
        });

        (format!("http://{}", addr), counters)
    }

    fn driver_for(base: &str) -> SessionDriver {
        SessionDriver::new(ApiClient::new(base).expect("should build client"))
    }

    #[tokio::test]
    async fn test_establish_activates_session() {
        let (base, _counters) = spawn_stub().await;
        let driver = driver_for(&base);

        driver.establish(ADA).await.expect("should establish");

        assert_eq!(
            driver.watch().current(),
            SessionState::Active {
                email: ADA.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_duplicate_triggers_harmless() {
        let (base, _counters) = spawn_stub().await;
        let driver = driver_for(&base);

        driver.establish(ADA).await.expect("first trigger");
        driver.establish(ADA).await.expect("second trigger");

        let applications = driver
            .fetch_job_applications(ADA)
            .await
            .expect("session should be usable");
        assert!(applications.is_empty());
        assert!(driver.watch().current().is_active());
    }

    #[tokio::test]
    async fn test_successful_fetch_keeps_session() {
        let (base, counters) = spawn_stub().await;
        let driver = driver_for(&base);

        driver.establish(ADA).await.expect("should establish");
        driver
            .fetch_job_applications(ADA)
            .await
            .expect("should fetch");

        assert!(driver.watch().current().is_active());
        assert_eq!(counters.logouts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_rejected_fetch_tears_down_once() {
        let (base, counters) = spawn_stub().await;
        let driver = driver_for(&base);

        driver.establish(ADA).await.expect("should establish");

        let err = driver
            .fetch_job_applications(GRACE)
            .await
            .expect_err("should be rejected");

        assert!(matches!(err, ClientError::Forbidden(_)));
        assert_eq!(
            driver.watch().current(),
            SessionState::SignedOut {
                cause: SignOutCause::AuthFailure
            }
        );
        // One request, one teardown: no retry after the rejection.
        assert_eq!(counters.application_calls.load(Ordering::SeqCst), 1);
        assert_eq!(counters.logouts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_teardown_publishes_sign_out() {
        let (base, counters) = spawn_stub().await;
        let driver = driver_for(&base);

        driver.establish(ADA).await.expect("should establish");
        driver.teardown().await.expect("should tear down");

        assert_eq!(
            driver.watch().current(),
            SessionState::SignedOut {
                cause: SignOutCause::UserRequested
            }
        );
        assert_eq!(counters.logouts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_after_teardown_rejected() {
        let (base, _counters) = spawn_stub().await;
        let driver = driver_for(&base);

        driver.establish(ADA).await.expect("should establish");
        driver.teardown().await.expect("should tear down");

        let err = driver
            .fetch_job_applications(ADA)
            .await
            .expect_err("cookie should be gone");
        assert!(matches!(err, ClientError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_drive_consumes_events() {
        let (base, _counters) = spawn_stub().await;
        let driver = driver_for(&base);
        let mut states = driver.watch().subscribe();

        let (tx, rx) = mpsc::channel(4);
        let loop_driver = driver.clone();
        let handle = tokio::spawn(async move { loop_driver.drive(rx).await });

        tx.send(IdentityEvent::SignedIn {
            email: ADA.to_string(),
        })
        .await
        .expect("should send");
        loop {
            if states.borrow_and_update().is_active() {
                break;
            }
            states.changed().await.expect("driver should publish");
        }

        tx.send(IdentityEvent::SignedOut).await.expect("should send");
        loop {
            let signed_out = *states.borrow_and_update()
                == SessionState::SignedOut {
                    cause: SignOutCause::UserRequested,
                };
            if signed_out {
                break;
            }
            states.changed().await.expect("driver should publish");
        }

        drop(tx);
        handle.await.expect("loop should end with the channel");
    }
}
