//! Job Dashboard CLI
//!
//! Lists tracked jobs and submits new ones to the job tracker API.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use dashboard::app;
use dashboard::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr so table/JSON output on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let command = cli.command.clone().unwrap_or(Commands::List);
    let mut stdout = std::io::stdout();
    let stdin = BufReader::new(tokio::io::stdin());
    app::run(command, &cli, &mut stdout, stdin).await
}
