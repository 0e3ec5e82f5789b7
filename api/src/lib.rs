//! Client for the job tracker REST API.
//!
//! ```no_run
//! # async fn run() -> api::Result<()> {
//! let config = api::ApiConfig::new(api::DEFAULT_BASE_URL, "token")?;
//! let client = api::ApiClient::new(config)?;
//! for job in client.get_jobs().await? {
//!     println!("{} - {}", job.company_label(), job.title_label());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::{ApiClient, JobsApi};
pub use config::{ApiConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, Result};
