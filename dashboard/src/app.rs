//! Command dispatch for the `jobboard` binary.
//!
//! Output goes to any writer and interactive input comes from any async
//! reader, so every command can be driven from tests.

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use api::{ApiClient, ApiConfig, JobsApi};
use common::{AnalysisRequest, Job, ManualJob};
use extractor::Extractor;

use crate::cli::{Cli, Commands, OutputFormat};
use crate::render;
use crate::view::{CreateOutcome, Dashboard};

/// Runs one command. `input` is only read by [`Commands::Interactive`].
pub async fn run<W, R>(
    command: Commands,
    cli: &Cli,
    out: &mut W,
    input: R,
) -> Result<ExitCode>
where
    W: Write,
    R: AsyncBufRead + Unpin,
{
    let output = cli.output;
    let client = || build_client(cli);

    match command {
        Commands::List => list(client()?, output, out).await,
        Commands::Create {
            url,
            company: Some(company_name),
            title,
            description,
        } => {
            let data = ManualJob {
                company_name,
                job_title: title.unwrap_or_default(),
                job_description: description.unwrap_or_default(),
                job_url: url,
            };
            let job = client()?.create_manual_job(&data).await?;
            emit_created(output, job.as_ref(), out)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Create { url, .. } => {
            create(client()?, url.unwrap_or_default(), output, out).await
        }
        Commands::Show { id } => {
            let job = client()?.get_job(id).await?;
            emit(output, &job, render::render_job, out)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Interactive => interactive(client()?, out, input).await,
        Commands::Resumes => {
            let resumes = client()?.get_resumes().await?;
            emit(output, &resumes, |r| render::render_resumes(r), out)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::UploadResume { file, job } => upload(client()?, &file, job, output, out).await,
        Commands::Analyze {
            job_id,
            resume_id,
            level,
            stack,
        } => {
            let request = AnalysisRequest::new(resume_id)
                .with_level(level)
                .with_stack(&stack);
            let accepted = client()?.run_analysis(job_id, &request).await?;
            if output == OutputFormat::Table {
                writeln!(out, "🚀 Analysis started for job #{job_id}")?;
            }
            emit(output, &accepted, render::render_accepted, out)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Analysis { job_id } => {
            let analysis = client()?.get_analysis(job_id).await?;
            emit(output, &analysis, render::render_analysis, out)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Preview { url } => preview(&url, output, out).await,
    }
}

fn build_client(cli: &Cli) -> Result<ApiClient> {
    let token = cli
        .token
        .clone()
        .context("No API token: pass --token or set JOBBOARD_API_TOKEN")?;

    let mut config = ApiConfig::new(&cli.api_url, token)?;
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    tracing::debug!(config = ?config, "Using API configuration");

    Ok(ApiClient::new(config)?)
}

/// Writes `value` as pretty JSON or with the given table renderer.
fn emit<T, W>(
    output: OutputFormat,
    value: &T,
    table: impl FnOnce(&T) -> String,
    out: &mut W,
) -> Result<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    match output {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(value)?)?,
        OutputFormat::Table => writeln!(out, "{}", table(value))?,
    }
    Ok(())
}

/// Reports a create the server accepted, with or without a record.
fn emit_created<W: Write>(output: OutputFormat, job: Option<&Job>, out: &mut W) -> Result<()> {
    match (output, job) {
        (OutputFormat::Json, Some(job)) => {
            writeln!(out, "{}", serde_json::to_string_pretty(job)?)?
        }
        (OutputFormat::Json, None) => {
            writeln!(out, "{}", serde_json::json!({ "status": "created" }))?
        }
        (OutputFormat::Table, Some(job)) => {
            writeln!(out, "✅ Created job #{}", job.id)?;
            writeln!(out, "{}", render::render_job(job))?;
        }
        (OutputFormat::Table, None) => writeln!(out, "✅ Job created")?,
    }
    Ok(())
}

async fn list<W: Write>(client: ApiClient, output: OutputFormat, out: &mut W) -> Result<ExitCode> {
    let mut dashboard = Dashboard::new(client);
    dashboard.mount().await;

    match output {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(dashboard.jobs())?)?
        }
        OutputFormat::Table => writeln!(out, "{}", render::render_dashboard(&dashboard))?,
    }

    Ok(exit_code(&dashboard))
}

async fn create<W: Write>(
    client: ApiClient,
    url: String,
    output: OutputFormat,
    out: &mut W,
) -> Result<ExitCode> {
    let mut dashboard = Dashboard::new(client);
    dashboard.set_url(url);
    let outcome = dashboard.create().await;

    match (output, &outcome) {
        (OutputFormat::Json, CreateOutcome::Created(job)) => {
            emit_created(output, job.as_ref(), out)?
        }
        (OutputFormat::Json, _) => {
            let error = dashboard.error().unwrap_or("URL is empty");
            writeln!(out, "{}", serde_json::json!({ "error": error }))?;
        }
        (OutputFormat::Table, CreateOutcome::Disabled) => {
            eprintln!("Nothing to submit: URL is empty")
        }
        (OutputFormat::Table, _) => writeln!(out, "{}", render::render_dashboard(&dashboard))?,
    }

    Ok(match outcome {
        CreateOutcome::Created(_) => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

async fn upload<W: Write>(
    client: ApiClient,
    file: &Path,
    job: Option<u64>,
    output: OutputFormat,
    out: &mut W,
) -> Result<ExitCode> {
    let resume = client.upload_resume(file, job).await?;
    if output == OutputFormat::Table {
        writeln!(out, "📄 Uploaded {}", file.display())?;
    }
    emit(output, &resume, |r| render::render_resumes(std::slice::from_ref(r)), out)?;
    Ok(ExitCode::SUCCESS)
}

async fn interactive<W, R>(client: ApiClient, out: &mut W, input: R) -> Result<ExitCode>
where
    W: Write,
    R: AsyncBufRead + Unpin,
{
    let mut dashboard = Dashboard::new(client);
    dashboard.mount().await;
    writeln!(out, "{}", render::render_dashboard(&dashboard))?;

    let mut lines = input.lines();
    loop {
        write!(out, "\nurl> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match line.trim() {
            ":q" => break,
            ":r" => dashboard.refresh().await,
            _ => {
                dashboard.set_url(line.as_str());
                match dashboard.create().await {
                    CreateOutcome::Created(Some(job)) => {
                        writeln!(out, "✅ Created job #{}", job.id)?
                    }
                    CreateOutcome::Created(None) => writeln!(out, "✅ Job created")?,
                    _ => {}
                }
            }
        }
        writeln!(out, "{}", render::render_dashboard(&dashboard))?;
    }

    Ok(ExitCode::SUCCESS)
}

async fn preview<W: Write>(url: &str, output: OutputFormat, out: &mut W) -> Result<ExitCode> {
    if output == OutputFormat::Table {
        writeln!(out, "🔍 Previewing {url}\n")?;
    }
    let posting = Extractor::new()?.extract_job_posting(url).await?;
    emit(output, &posting, render::render_posting, out)?;
    Ok(ExitCode::SUCCESS)
}

fn exit_code<A: JobsApi>(dashboard: &Dashboard<A>) -> ExitCode {
    if dashboard.error().is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
