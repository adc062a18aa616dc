//! Data-store seam for the job board.
//!
//! The store queried by the protected endpoints is an external collaborator
//! as far as the session machinery is concerned; handlers only depend on
//! this trait. The in-memory implementation backs the binary and the tests.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use shared::{ApplicationStatus, Job, JobApplication};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Operations the API needs from the data store.
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// All published jobs, newest first.
    async fn list_jobs(&self) -> Result<Vec<Job>>;

    /// Applications filed by one applicant, newest first.
    async fn list_applications_for(&self, email: &str) -> Result<Vec<JobApplication>>;

    /// File a new application. Returns `None` when the job does not exist.
    async fn submit_application(&self, email: &str, job_id: Uuid)
        -> Result<Option<JobApplication>>;
}

/// In-memory stand-in for the external data store.
#[derive(Default)]
pub struct InMemoryApplicationStore {
    jobs: RwLock<Vec<Job>>,
    applications: RwLock<Vec<JobApplication>>,
}

impl InMemoryApplicationStore {
    /// Store preloaded with enough jobs and applications to exercise every
    /// endpoint.
    pub fn seeded() -> Self {
        let now = Utc::now();

        let backend_job = Job {
            id: Uuid::new_v4(),
            title: "Backend Engineer".to_string(),
            company: "Acme Systems".to_string(),
            location: "Remote".to_string(),
            posted_at: now - Duration::days(3),
        };
        let data_job = Job {
            id: Uuid::new_v4(),
            title: "Data Engineer".to_string(),
            company: "Initech".to_string(),
            location: "Berlin".to_string(),
            posted_at: now - Duration::days(1),
        };

        let applications = vec![
            JobApplication {
                id: Uuid::new_v4(),
                job_id: backend_job.id,
                applicant_email: "ada@example.com".to_string(),
                job_title: backend_job.title.clone(),
                company: backend_job.company.clone(),
                status: ApplicationStatus::InReview,
                applied_at: now - Duration::days(2),
            },
            JobApplication {
                id: Uuid::new_v4(),
                job_id: data_job.id,
                applicant_email: "ada@example.com".to_string(),
                job_title: data_job.title.clone(),
                company: data_job.company.clone(),
                status: ApplicationStatus::Submitted,
                applied_at: now - Duration::hours(4),
            },
            JobApplication {
                id: Uuid::new_v4(),
                job_id: backend_job.id,
                applicant_email: "grace@example.com".to_string(),
                job_title: backend_job.title.clone(),
                company: backend_job.company.clone(),
                status: ApplicationStatus::Submitted,
                applied_at: now - Duration::days(1),
            },
        ];

        Self {
            jobs: RwLock::new(vec![backend_job, data_job]),
            applications: RwLock::new(applications),
        }
    }
}

#[async_trait]
impl ApplicationStore for InMemoryApplicationStore {
    async fn list_jobs(&self) -> Result<Vec<Job>> {
        let mut jobs = self.jobs.read().await.clone();
        jobs.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));
        Ok(jobs)
    }

    async fn list_applications_for(&self, email: &str) -> Result<Vec<JobApplication>> {
        let applications = self.applications.read().await;
        let mut scoped: Vec<JobApplication> = applications
            .iter()
            .filter(|a| a.applicant_email == email)
            .cloned()
            .collect();
        scoped.sort_by(|a, b| b.applied_at.cmp(&a.applied_at));
        Ok(scoped)
    }

    async fn submit_application(
        &self,
        email: &str,
        job_id: Uuid,
    ) -> Result<Option<JobApplication>> {
        let job = {
            let jobs = self.jobs.read().await;
            jobs.iter().find(|j| j.id == job_id).cloned()
        };

        let Some(job) = job else {
            return Ok(None);
        };

        let application = JobApplication {
            id: Uuid::new_v4(),
            job_id: job.id,
            applicant_email: email.to_string(),
            job_title: job.title,
            company: job.company,
            status: ApplicationStatus::Submitted,
            applied_at: Utc::now(),
        };

        self.applications.write().await.push(application.clone());
        Ok(Some(application))
    }
}
