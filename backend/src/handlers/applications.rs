//! Protected job-application endpoints.
//!
//! Everything here runs behind `require_auth`, so a missing or bad token
//! never reaches these handlers. What they add is the ownership check: the
//! records named by the request must belong to the verified identity.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use shared::{JobApplication, JobApplicationsQuery, SubmitApplicationRequest};

use crate::auth::{require_owner, types::AuthSession};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// List the applications filed by one applicant.
pub async fn list_job_applications(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Query(query): Query<JobApplicationsQuery>,
) -> ApiResult<Json<Vec<JobApplication>>> {
    require_owner(&session, &query.email)?;

    let applications = state.store.list_applications_for(&query.email).await?;

    Ok(Json(applications))
}

/// File an application on behalf of the verified identity.
pub async fn submit_job_application(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Json(payload): Json<SubmitApplicationRequest>,
) -> ApiResult<(StatusCode, Json<JobApplication>)> {
    require_owner(&session, &payload.applicant_email)?;

    let application = state
        .store
        .submit_application(&payload.applicant_email, payload.job_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Job"))?;

    tracing::info!(
        "Application {} filed by {} for job {}",
        application.id,
        application.applicant_email,
        application.job_id
    );

    Ok((StatusCode::CREATED, Json(application)))
}
