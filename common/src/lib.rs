//! Wire types shared by the API client and the dashboard.
//!
//! The server owns these shapes. Fields the client does not know about are
//! kept verbatim so nothing is lost when a record is printed back out.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Label shown for a job without a company name.
pub const NO_COMPANY: &str = "No Company";

/// Label shown for a job without a title.
pub const NO_TITLE: &str = "No Title";

/// Declares a string-backed enum that accepts values it does not know.
macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            /// A value this client does not recognise, kept as sent.
            Other(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $text,)+
                    Self::Other(other) => other.as_str(),
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $($text => Self::$variant,)+
                    _ => Self::Other(value),
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum! {
    /// Where a job description came from.
    DescriptionSource {
        Manual => "manual",
        Extracted => "extracted",
    }
}

string_enum! {
    /// Progress of the server-side description extraction.
    ExtractionStatus {
        Pending => "pending",
        Success => "success",
        Failed => "failed",
    }
}

string_enum! {
    /// Lifecycle of a resume analysis.
    AnalysisStatus {
        Pending => "pending",
        Processing => "processing",
        Completed => "completed",
        Failed => "failed",
    }
}

/// A job record as returned by the server.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Job {
    pub id: u64,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub job_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_source: Option<DescriptionSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extraction_status: Option<ExtractionStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Any other fields the server sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Job {
    /// Company name for display, falling back to [`NO_COMPANY`] when absent or empty.
    pub fn company_label(&self) -> &str {
        non_empty(self.company_name.as_deref()).unwrap_or(NO_COMPANY)
    }

    /// Job title for display, falling back to [`NO_TITLE`] when absent or empty.
    pub fn title_label(&self) -> &str {
        non_empty(self.job_title.as_deref()).unwrap_or(NO_TITLE)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Payload for creating a job from a posting URL.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct NewJob {
    pub job_url: String,
}

impl NewJob {
    pub fn new(job_url: impl Into<String>) -> Self {
        Self {
            job_url: job_url.into(),
        }
    }
}

/// Payload for creating a job by hand, without a posting URL.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ManualJob {
    pub company_name: String,
    pub job_title: String,
    pub job_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_url: Option<String>,
}

/// An uploaded resume.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Resume {
    pub id: u64,
    #[serde(default)]
    pub job_application: Option<u64>,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub parsed_text: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Resume {
    /// True once the server has extracted text from the uploaded file.
    pub fn is_parsed(&self) -> bool {
        self.parsed_text
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty())
    }
}

/// Seniority the analysis should assume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateLevel {
    Fresher,
    #[default]
    Experienced,
}

impl fmt::Display for CandidateLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fresher => f.write_str("fresher"),
            Self::Experienced => f.write_str("experienced"),
        }
    }
}

impl FromStr for CandidateLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fresher" => Ok(Self::Fresher),
            "experienced" => Ok(Self::Experienced),
            other => Err(format!(
                "candidate level must be either 'fresher' or 'experienced', got '{other}'"
            )),
        }
    }
}

/// Request body for starting a resume analysis against a job.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub resume_id: u64,
    #[serde(default)]
    pub candidate_level: CandidateLevel,
    #[serde(default)]
    pub target_stack: Vec<String>,
}

impl AnalysisRequest {
    pub fn new(resume_id: u64) -> Self {
        Self {
            resume_id,
            candidate_level: CandidateLevel::default(),
            target_stack: Vec::new(),
        }
    }

    pub fn with_level(mut self, level: CandidateLevel) -> Self {
        self.candidate_level = level;
        self
    }

    /// Sets the target stack from a comma separated list, dropping blanks.
    pub fn with_stack(mut self, stack: &str) -> Self {
        self.target_stack = stack
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect();
        self
    }
}

/// Acknowledgement returned when an analysis has been queued.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AnalysisAccepted {
    pub analysis_id: u64,
    pub status: AnalysisStatus,
    #[serde(default)]
    pub candidate_level: Option<CandidateLevel>,
    #[serde(default)]
    pub target_stack: Vec<String>,
    #[serde(default)]
    pub message: String,
}

/// Result of a resume analysis. Only `status` is present before one exists.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Analysis {
    pub status: AnalysisStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ats_score: Option<i64>,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl Analysis {
    pub fn is_finished(&self) -> bool {
        matches!(self.status, AnalysisStatus::Completed | AnalysisStatus::Failed)
    }
}
