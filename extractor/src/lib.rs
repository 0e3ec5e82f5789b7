//! Job posting extractor
//!
//! Downloads a job posting page and pulls out the title, company and
//! description the same way the server does when a job is created from a
//! URL. Used to preview a link before submitting it.

mod description;
mod metadata;

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Client;
use scraper::Selector;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use description::extract_description;
use metadata::extract_metadata;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Invalid job URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Extraction blocked by website.")]
    Blocked(#[source] reqwest::Error),

    #[error("Could not extract sufficient content from the job posting.")]
    InsufficientContent,

    #[error("HTTP client setup failed: {0}")]
    Setup(#[source] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Everything extracted from one posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobPosting {
    pub job_title: String,
    pub company_name: String,
    pub job_description: String,
}

/// Fetches posting pages with browser-like headers.
#[derive(Debug, Clone)]
pub struct Extractor {
    client: Client,
}

impl Extractor {
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(ExtractionError::Setup)?;

        Ok(Self { client })
    }

    /// Downloads a page. Any transport failure or non-success status counts
    /// as the site blocking us.
    pub async fn fetch_html(&self, url: &str) -> Result<String> {
        let url = Url::parse(url)?;
        debug!(url = %url, "Fetching job posting");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                warn!(url = %url, error = %e, "Job posting fetch failed");
                ExtractionError::Blocked(e)
            })?;

        let html = response.text().await.map_err(ExtractionError::Blocked)?;
        debug!(url = %url, bytes = html.len(), "Fetched job posting");
        Ok(html)
    }

    /// Fetches `url` and extracts description, title and company.
    pub async fn extract_job_posting(&self, url: &str) -> Result<JobPosting> {
        let html = self.fetch_html(url).await?;
        let job_description = extract_description(&html)?;
        let metadata = extract_metadata(&html, url);

        Ok(JobPosting {
            job_title: metadata.job_title,
            company_name: metadata.company_name,
            job_description,
        })
    }
}

/// Collapses every run of whitespace into a single space.
fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}
