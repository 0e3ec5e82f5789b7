//! The dashboard page as a state machine.
//!
//! State is the last fetched job list, the text in the URL input, and the
//! last failure (if any). Fetch and create failures never escape the view:
//! they are logged and kept in [`Dashboard::error`] for the renderer.

use api::JobsApi;
use common::{Job, NewJob};
use tracing::{debug, info, warn};

/// What happened when the create button was pressed.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    /// The input was empty or whitespace; nothing was sent.
    Disabled,
    /// The server accepted the job. The input was cleared and the list
    /// re-fetched. Carries the record when the server sent one back.
    Created(Option<Job>),
    /// The request failed. The input is kept so it can be retried.
    Failed,
}

/// One rendered entry of the job list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobCard<'a> {
    pub key: u64,
    pub company: &'a str,
    pub title: &'a str,
}

pub struct Dashboard<A> {
    api: A,
    jobs: Vec<Job>,
    url: String,
    error: Option<String>,
}

impl<A: JobsApi> Dashboard<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            jobs: Vec::new(),
            url: String::new(),
            error: None,
        }
    }

    /// Initial load of the page.
    pub async fn mount(&mut self) {
        debug!("Mounting dashboard");
        self.refresh().await;
    }

    /// Re-fetches the list. On success the list is replaced wholesale; on
    /// failure the previous list stays on screen.
    pub async fn refresh(&mut self) {
        match self.api.get_jobs().await {
            Ok(jobs) => {
                debug!(count = jobs.len(), "Job list loaded");
                self.jobs = jobs;
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "Failed to load jobs");
                self.error = Some(format!("Could not load jobs: {e}"));
            }
        }
    }

    /// Replaces the input text.
    pub fn set_url(&mut self, value: impl Into<String>) {
        self.url = value.into();
    }

    pub fn is_create_disabled(&self) -> bool {
        self.url.trim().is_empty()
    }

    /// Submits the input as a new job, then clears it and re-fetches.
    pub async fn create(&mut self) -> CreateOutcome {
        if self.is_create_disabled() {
            debug!("Create ignored: URL is empty");
            return CreateOutcome::Disabled;
        }

        let payload = NewJob::new(self.url.clone());
        match self.api.create_job(&payload).await {
            Ok(job) => {
                info!(id = job.as_ref().map(|j| j.id), url = %payload.job_url, "Job created");
                self.url.clear();
                self.error = None;
                self.refresh().await;
                CreateOutcome::Created(job)
            }
            Err(e) => {
                warn!(url = %payload.job_url, error = %e, "Failed to create job");
                self.error = Some(format!("Could not create job: {e}"));
                CreateOutcome::Failed
            }
        }
    }

    /// Cards in server order, keyed on the job id.
    pub fn cards(&self) -> Vec<JobCard<'_>> {
        self.jobs
            .iter()
            .map(|job| JobCard {
                key: job.id,
                company: job.company_label(),
                title: job.title_label(),
            })
            .collect()
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn api(&self) -> &A {
        &self.api
    }
}
