//! Command line definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use api::DEFAULT_BASE_URL;
use common::CandidateLevel;

#[derive(Parser, Debug)]
#[command(name = "jobboard")]
#[command(version)]
#[command(about = "Terminal dashboard for the job tracker API")]
pub struct Cli {
    /// API origin including the /api/ prefix
    #[arg(long, env = "JOBBOARD_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub api_url: String,

    /// Bearer token for the API
    #[arg(long, env = "JOBBOARD_API_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Request timeout in seconds (no timeout when omitted)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(long, short = 'o', default_value = "table", global = true)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show the dashboard (default)
    List,

    /// Submit a job posting URL, or enter a job by hand with --company,
    /// --title and --description
    Create {
        /// Job posting URL
        #[arg(required_unless_present = "company")]
        url: Option<String>,

        /// Company name for a job entered by hand
        #[arg(long, requires_all = ["title", "description"])]
        company: Option<String>,

        /// Job title for a job entered by hand
        #[arg(long, requires = "company")]
        title: Option<String>,

        /// Job description for a job entered by hand
        #[arg(long, requires = "company")]
        description: Option<String>,
    },

    /// Show every field of one job
    Show {
        /// Job ID
        id: u64,
    },

    /// Line-driven dashboard: type a URL to submit it, :r to refresh, :q to quit
    Interactive,

    /// List uploaded resumes
    Resumes,

    /// Upload a resume file, optionally attached to a job
    UploadResume {
        /// Resume file (PDF)
        file: PathBuf,

        /// Job ID to attach the resume to
        #[arg(long)]
        job: Option<u64>,
    },

    /// Start a resume analysis against a job
    Analyze {
        /// Job ID
        job_id: u64,

        /// Resume to analyse
        #[arg(long)]
        resume_id: u64,

        /// Candidate level (fresher, experienced)
        #[arg(long, default_value_t = CandidateLevel::Experienced)]
        level: CandidateLevel,

        /// Comma separated target stack, e.g. "rust,tokio"
        #[arg(long, default_value = "")]
        stack: String,
    },

    /// Show the analysis result for a job
    Analysis {
        /// Job ID
        job_id: u64,
    },

    /// Fetch a posting locally and show what would be extracted
    Preview {
        /// Job posting URL
        url: String,
    },
}
