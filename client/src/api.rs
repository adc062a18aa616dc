//! Typed HTTP client for the job board API.
//!
//! Built over a cookie store, so the session cookie set by the issuance
//! endpoint is resent on every later request without calling code ever
//! seeing the token. This plays the role the browser plays for a web
//! client.

use reqwest::{Client, StatusCode, Url};
use shared::{
    AuthSessionResponse, ErrorResponse, IssueTokenRequest, IssueTokenResponse, Job,
    JobApplication, LogoutResponse, SubmitApplicationRequest,
};
use uuid::Uuid;

use crate::error::ClientError;

/// Credentialed API client bound to one backend origin.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|e| ClientError::Url(e.to_string()))?;
        let http = Client::builder().cookie_store(true).build()?;
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::Url(e.to_string()))
    }

    /// Ask the server to mint a session token for an identity and store it
    /// in the session cookie.
    pub async fn issue_token(&self, email: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.endpoint("/jwt")?)
            .json(&IssueTokenRequest {
                email: email.to_string(),
            })
            .send()
            .await?;

        let ack: IssueTokenResponse = Self::decode(response).await?;
        if !ack.success {
            return Err(ClientError::Api {
                status: StatusCode::OK.as_u16(),
                message: "Issuance was not acknowledged".to_string(),
            });
        }
        Ok(())
    }

    /// Clear the session cookie, server-side and locally.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let response = self.http.post(self.endpoint("/logout")?).send().await?;
        let _ack: LogoutResponse = Self::decode(response).await?;
        Ok(())
    }

    /// The identity the server associates with the current cookie.
    pub async fn me(&self) -> Result<AuthSessionResponse, ClientError> {
        let response = self.http.get(self.endpoint("/me")?).send().await?;
        Self::decode(response).await
    }

    pub async fn list_jobs(&self) -> Result<Vec<Job>, ClientError> {
        let response = self.http.get(self.endpoint("/jobs")?).send().await?;
        Self::decode(response).await
    }

    /// Fetch the applications filed by `email`. The server rejects the call
    /// unless the session identity matches.
    pub async fn list_job_applications(
        &self,
        email: &str,
    ) -> Result<Vec<JobApplication>, ClientError> {
        let response = self
            .http
            .get(self.endpoint("/job-applications")?)
            .query(&[("email", email)])
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn submit_application(
        &self,
        email: &str,
        job_id: Uuid,
    ) -> Result<JobApplication, ClientError> {
        let response = self
            .http
            .post(self.endpoint("/job-applications")?)
            .json(&SubmitApplicationRequest {
                applicant_email: email.to_string(),
                job_id,
            })
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Decode a success body, or map an error response onto the client
    /// taxonomy.
    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = response
            .json::<ErrorResponse>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| status.to_string());

        Err(match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
            StatusCode::FORBIDDEN => ClientError::Forbidden(message),
            _ => ClientError::Api {
                status: status.as_u16(),
                message,
            },
        })
    }
}
