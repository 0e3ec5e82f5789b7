//! HTTP client for the jobs API.

use std::path::Path;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use common::{Analysis, AnalysisAccepted, AnalysisRequest, Job, ManualJob, NewJob, Resume};

use crate::config::ApiConfig;
use crate::error::{ApiError, Result};

/// The two operations the dashboard needs.
///
/// [`ApiClient`] is the real implementation; tests drive the view with
/// in-memory fakes.
#[async_trait]
pub trait JobsApi: Send + Sync {
    /// Fetches the job list in server order.
    async fn get_jobs(&self) -> Result<Vec<Job>>;

    /// Submits a new job. Any success status counts as created; the record
    /// is returned when the server echoes one back.
    async fn create_job(&self, data: &NewJob) -> Result<Option<Job>>;
}

/// Pre-configured client: every request carries the bearer token and a JSON
/// content type.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| ApiError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("jobboard-dashboard/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    /// `GET jobs/list/`
    pub async fn get_jobs(&self) -> Result<Vec<Job>> {
        self.get("jobs/list/").await
    }

    /// `POST jobs/create/`. The payload is sent as given.
    pub async fn create_job(&self, data: &NewJob) -> Result<Option<Job>> {
        self.post_created("jobs/create/", data).await
    }

    /// `POST jobs/create/` with the posting details filled in by hand.
    pub async fn create_manual_job(&self, data: &ManualJob) -> Result<Option<Job>> {
        self.post_created("jobs/create/", data).await
    }

    /// `GET jobs/{id}/`
    pub async fn get_job(&self, id: u64) -> Result<Job> {
        self.get(&format!("jobs/{id}/")).await
    }

    /// `GET resumes/list/`
    pub async fn get_resumes(&self) -> Result<Vec<Resume>> {
        self.get("resumes/list/").await
    }

    /// `POST resumes/upload/` as a multipart form with the file under `file`
    /// and an optional `job_application` link.
    pub async fn upload_resume(
        &self,
        path: &Path,
        job_application: Option<u64>,
    ) -> Result<Resume> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume.pdf".to_string());

        let mut part = Part::bytes(bytes).file_name(file_name);
        if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("pdf")) {
            part = part.mime_str("application/pdf")?;
        }
        let mut form = Form::new().part("file", part);
        if let Some(id) = job_application {
            form = form.text("job_application", id.to_string());
        }

        let url = self.config.endpoint("resumes/upload/")?;
        debug!(method = "POST", url = %url, path = %path.display(), "Uploading resume");
        // The multipart content type set here replaces the default JSON one.
        let response = self.http.post(url).multipart(form).send().await?;
        decode(response).await
    }

    /// `POST ai/analyze/{job_id}/`. The server queues the work and answers
    /// immediately; poll [`ApiClient::get_analysis`] for the outcome.
    pub async fn run_analysis(
        &self,
        job_id: u64,
        request: &AnalysisRequest,
    ) -> Result<AnalysisAccepted> {
        self.post(&format!("ai/analyze/{job_id}/"), request).await
    }

    /// `GET ai/result/{job_id}/`
    pub async fn get_analysis(&self, job_id: u64) -> Result<Analysis> {
        self.get(&format!("ai/result/{job_id}/")).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.config.endpoint(path)?;
        debug!(method = "GET", url = %url, "Sending request");
        let response = self.http.get(url).send().await?;
        decode(response).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path)?;
        debug!(method = "POST", url = %url, "Sending request");
        let response = self.http.post(url).json(body).send().await?;
        decode(response).await
    }

    async fn post_created<B>(&self, path: &str, body: &B) -> Result<Option<Job>>
    where
        B: Serialize + ?Sized,
    {
        let url = self.config.endpoint(path)?;
        debug!(method = "POST", url = %url, "Sending request");
        let response = self.http.post(url).json(body).send().await?;
        decode_created(response).await
    }
}

#[async_trait]
impl JobsApi for ApiClient {
    async fn get_jobs(&self) -> Result<Vec<Job>> {
        ApiClient::get_jobs(self).await
    }

    async fn create_job(&self, data: &NewJob) -> Result<Option<Job>> {
        ApiClient::create_job(self, data).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let url = response.url().clone();
    let body = response.text().await?;

    if !status.is_success() {
        warn!(status = status.as_u16(), url = %url, "Request failed");
        return Err(ApiError::from_status(status, body));
    }

    debug!(status = status.as_u16(), bytes = body.len(), "Received response");
    Ok(serde_json::from_str(&body)?)
}

/// Like [`decode`], but a success body that is empty or not a job is an
/// acknowledgement rather than an error.
async fn decode_created(response: Response) -> Result<Option<Job>> {
    let status = response.status();
    let url = response.url().clone();
    let body = response.text().await?;

    if !status.is_success() {
        warn!(status = status.as_u16(), url = %url, "Request failed");
        return Err(ApiError::from_status(status, body));
    }

    if body.trim().is_empty() {
        debug!(status = status.as_u16(), "Job created, empty acknowledgement");
        return Ok(None);
    }
    match serde_json::from_str(&body) {
        Ok(job) => Ok(Some(job)),
        Err(e) => {
            debug!(status = status.as_u16(), error = %e, "Job created, body is not a job record");
            Ok(None)
        }
    }
}
