use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::{ApiError, Result};

/// Origin used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/";

/// Connection settings for the jobs API.
///
/// The credential is supplied at startup (flag or environment) and is never
/// printed by `Debug`.
#[derive(Clone)]
pub struct ApiConfig {
    /// API origin including the `/api/` prefix. Always ends with `/`.
    pub base_url: Url,
    /// Bearer token presented on every request.
    pub token: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl ApiConfig {
    /// Builds a config for `base_url`, adding a trailing slash when missing.
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            token: token.into(),
            timeout: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Resolves an endpoint path relative to the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|source| ApiError::InvalidBaseUrl {
                url: format!("{}{}", self.base_url, path),
                source,
            })
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim()).map_err(|source| ApiError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    })?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
