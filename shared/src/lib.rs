use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Session API Types
// ============================================================================

/// Body of `POST /jwt`: the identity handed over by the upstream identity
/// provider after it has authenticated the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueTokenRequest {
    pub email: String,
}

/// Acknowledgement for `POST /jwt`. The token itself travels only in the
/// HTTP-only session cookie, never in a response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueTokenResponse {
    pub success: bool,
}

/// Acknowledgement for `POST /logout`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Identity echo returned by `GET /me` for a cookie-holding client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSessionResponse {
    pub email: String,
}

// ============================================================================
// Job Board Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub posted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: Uuid,
    pub job_id: Uuid,
    pub applicant_email: String,
    pub job_title: String,
    pub company: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Submitted,
    InReview,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ApplicationStatus::Submitted => "submitted",
            ApplicationStatus::InReview => "in_review",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

/// Query string for `GET /job-applications`: whose records are being asked
/// for. Must name the session identity or the request is rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobApplicationsQuery {
    pub email: String,
}

/// Body of `POST /job-applications`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitApplicationRequest {
    pub applicant_email: String,
    pub job_id: Uuid,
}

// ============================================================================
// Error Body
// ============================================================================

/// JSON body attached to every non-success API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
