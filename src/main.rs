mod cli;
mod commands;
mod config;
mod validate;

use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;

use cli::Args;
use config::{FileConfig, Settings};
use kubemgr_k8s::KubeClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr so they never mix with table output
    let default_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run_app(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Startup failures come back as `Err`; command failures are reported here
/// and mapped to their exit code.
async fn run_app(args: Args) -> Result<ExitCode> {
    let file = FileConfig::load(args.config.as_deref())?;
    let settings = Settings::resolve(&args, file);

    let client = KubeClient::connect(&settings.connect)
        .await
        .context("Failed to connect to cluster")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match commands::run(&client, &args.command, &settings, Utc::now(), &mut out).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("{err}");
            Ok(ExitCode::from(err.exit_code()))
        }
    }
}
