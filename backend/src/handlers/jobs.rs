//! Public job-board endpoints.

use axum::{extract::State, Json};
use shared::Job;

use crate::error::ApiResult;
use crate::AppState;

/// Job listing. Browsing does not require a session.
pub async fn list_jobs(State(state): State<AppState>) -> ApiResult<Json<Vec<Job>>> {
    let jobs = state.store.list_jobs().await?;
    Ok(Json(jobs))
}
