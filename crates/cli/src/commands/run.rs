// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rr run <spec.json>` - Submit a serial workflow

use crate::config::Config;
use crate::error::engine_error;
use crate::output::{self, OutputFormat, Submitted};
use anyhow::{Context, Result};
use clap::Args;
use rr_core::WorkflowSpec;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct RunArgs {
    /// REANA serial workflow specification (JSON)
    pub spec: PathBuf,

    /// Directory that input files are resolved against (default: the directory holding the file)
    #[arg(long)]
    pub source_dir: Option<PathBuf>,
}

pub async fn handle(args: RunArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let content = std::fs::read_to_string(&args.spec)
        .with_context(|| format!("failed to read {}", args.spec.display()))?;
    let specification: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", args.spec.display()))?;

    let source_dir = args
        .source_dir
        .unwrap_or_else(|| spec_dir(&args.spec).to_path_buf());
    let spec = WorkflowSpec::from_serial(specification, &source_dir)?;

    let engine = super::engine(config)?;
    let run_id = engine.execute(&spec).await.map_err(engine_error)?;

    output::print(&Submitted { run_id }, format);
    Ok(())
}

fn spec_dir(spec: &Path) -> &Path {
    match spec.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
