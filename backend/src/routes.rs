//! API route definitions.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::auth;
use crate::handlers::{applications, health, jobs};
use crate::AppState;

/// Assemble the API router.
///
/// Routes in the protected subrouter run only after `require_auth` has
/// verified the session cookie and attached the identity to the request.
pub fn api_routes(state: AppState) -> Router {
    let protected = Router::new()
        .route(
            "/job-applications",
            get(applications::list_job_applications).post(applications::submit_job_application),
        )
        .route("/me", get(auth::me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Public job board
        .route("/jobs", get(jobs::list_jobs))
        // Session lifecycle
        .route("/jwt", post(auth::issue_token))
        .route("/logout", post(auth::logout))
        .merge(protected)
        .with_state(state)
}
