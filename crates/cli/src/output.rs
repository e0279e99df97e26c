// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use chrono::{DateTime, SecondsFormat, Utc};
use clap::ValueEnum;
use rr_core::{RunId, RunRecord, RunStage, RunState};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print output in the specified format
pub fn print<T: Serialize + fmt::Display>(value: &T, format: OutputFormat) {
    match format {
        OutputFormat::Text => print!("{}", value),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(value) {
                println!("{}", json);
            }
        }
    }
}

/// Print a list of items
pub fn print_list<T: Serialize + fmt::Display>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            for item in items {
                println!("{}", item);
            }
        }
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(items) {
                println!("{}", json);
            }
        }
    }
}

/// Identifier of a newly submitted run
#[derive(Serialize)]
pub struct Submitted {
    pub run_id: RunId,
}

impl fmt::Display for Submitted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.run_id)
    }
}

/// State of one run
#[derive(Serialize)]
pub struct StateView<'a> {
    pub run_id: &'a RunId,
    pub state: &'a RunState,
}

impl fmt::Display for StateView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Run: {}", self.run_id)?;
        write_state(f, self.state)
    }
}

/// Full record of one run
#[derive(Serialize)]
pub struct RecordView<'a> {
    pub run_id: &'a RunId,
    #[serde(flatten)]
    pub record: &'a RunRecord,
}

impl fmt::Display for RecordView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Run: {}", self.run_id)?;
        writeln!(f, "  Workflow: {}", self.record.workflow_id)?;
        write_state(f, &self.record.state)?;
        if !self.record.outputs.is_empty() {
            writeln!(f, "  Outputs:")?;
            for name in &self.record.outputs {
                writeln!(f, "    {}", name)?;
            }
        }
        Ok(())
    }
}

/// One row of the run listing
#[derive(Serialize)]
pub struct RunSummary {
    pub run_id: RunId,
    pub stage: RunStage,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<38} {:<8} {}",
            self.run_id.as_str(),
            self.stage.name(),
            timestamp(&self.created_at)
        )
    }
}

fn write_state(f: &mut fmt::Formatter<'_>, state: &RunState) -> fmt::Result {
    writeln!(f, "  Stage: {}", state.stage())?;
    writeln!(f, "  Created: {}", timestamp(&state.created_at()))?;
    if let Some(started_at) = state.started_at() {
        writeln!(f, "  Started: {}", timestamp(&started_at))?;
    }
    if let Some(ended_at) = state.ended_at() {
        writeln!(f, "  Ended: {}", timestamp(&ended_at))?;
    }
    if !state.messages().is_empty() {
        writeln!(f, "  Messages:")?;
        for message in state.messages() {
            writeln!(f, "    {}", message)?;
        }
    }
    if let Some(resources) = state.resources().filter(|r| !r.is_empty()) {
        writeln!(f, "  Resources:")?;
        for (name, path) in resources {
            writeln!(f, "    {}: {}", name, path.display())?;
        }
    }
    Ok(())
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}
