// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rr - reconcile local run records with a REANA cluster

mod commands;
mod completions;
mod config;
mod error;
mod output;

use crate::completions::CompletionsArgs;
use crate::config::Config;
use crate::error::RrError;
use crate::output::OutputFormat;
use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{run, runs};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_appender::non_blocking::WorkerGuard;

/// Environment variable holding the log filter
const LOG_ENV: &str = "RR_LOG";

#[derive(Parser)]
#[command(
    name = "rr",
    version,
    about = "rr - Run workflows on a REANA cluster and track their state"
)]
struct Cli {
    /// Configuration file (default: <config dir>/rr/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding run records
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a serial workflow and print the new run id
    Run(run::RunArgs),
    /// Reconcile a run with the cluster and print its state
    Status {
        /// Run ID
        id: String,
    },
    /// Stop a run and mark it failed
    Cancel {
        /// Run ID
        id: String,
    },
    /// List stored runs
    List,
    /// Show the stored record of a run without contacting the cluster
    Show {
        /// Run ID
        id: String,
    },
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<RrError>() {
                Some(friendly) => eprint!("{}", friendly),
                None => eprintln!("error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(cli: Cli) -> Result<()> {
    // Completions need neither configuration nor logging
    if let Commands::Completions(args) = cli.command {
        args.write::<Cli>(&mut std::io::stdout());
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref(), cli.base_dir)?;
    let _guard = setup_logging(&config)?;
    let format = cli.output;

    match cli.command {
        Commands::Run(args) => run::handle(args, &config, format).await,
        Commands::Status { id } => runs::status(id, &config, format).await,
        Commands::Cancel { id } => runs::cancel(id, &config, format).await,
        Commands::List => runs::list(&config, format),
        Commands::Show { id } => runs::show(id, &config, format),
        Commands::Completions(_) => Ok(()),
    }
}

/// Log to stderr, or to the configured log file
///
/// The returned guard flushes buffered file output when dropped.
fn setup_logging(config: &Config) -> Result<Option<WorkerGuard>> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let Some(log_file) = &config.log_file else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()?;
        return Ok(None);
    };

    let directory = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = log_file
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("log_file must name a file: {}", log_file.display()))?;
    std::fs::create_dir_all(&directory)?;

    let file_appender = tracing_appender::rolling::never(&directory, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .try_init()?;

    Ok(Some(guard))
}
