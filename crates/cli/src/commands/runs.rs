// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Commands that inspect or drive existing runs

use crate::config::Config;
use crate::error::engine_error;
use crate::output::{self, OutputFormat, RecordView, RunSummary, StateView};
use anyhow::Result;
use rr_core::{RunId, RunState};
use rr_engine::EngineError;

/// `rr status <id>` - Reconcile a run with the cluster and print its state
pub async fn status(id: String, config: &Config, format: OutputFormat) -> Result<()> {
    let run_id = RunId(id);
    let state = match finished_state(&run_id, config)? {
        Some(state) => state,
        None => super::engine(config)?
            .get_state(&run_id)
            .await
            .map_err(engine_error)?,
    };

    output::print(
        &StateView {
            run_id: &run_id,
            state: &state,
        },
        format,
    );
    Ok(())
}

/// `rr cancel <id>` - Stop a run and mark it failed
pub async fn cancel(id: String, config: &Config, format: OutputFormat) -> Result<()> {
    let run_id = RunId(id);
    let state = match finished_state(&run_id, config)? {
        Some(state) => state,
        None => super::engine(config)?
            .cancel_run(&run_id)
            .await
            .map_err(engine_error)?,
    };

    output::print(
        &StateView {
            run_id: &run_id,
            state: &state,
        },
        format,
    );
    Ok(())
}

/// `rr show <id>` - Print the stored record without contacting the cluster
pub fn show(id: String, config: &Config, format: OutputFormat) -> Result<()> {
    let run_id = RunId(id);
    let record = super::store(config)?
        .load(&run_id)
        .map_err(|e| engine_error(EngineError::from(e)))?;

    output::print(
        &RecordView {
            run_id: &run_id,
            record: &record,
        },
        format,
    );
    Ok(())
}

/// `rr list` - List stored runs
pub fn list(config: &Config, format: OutputFormat) -> Result<()> {
    let store = super::store(config)?;

    let mut runs = Vec::new();
    for run_id in store.list()? {
        match store.load(&run_id) {
            Ok(record) => runs.push(RunSummary {
                stage: record.state.stage(),
                created_at: record.state.created_at(),
                run_id,
            }),
            Err(e) => tracing::warn!(run_id = %run_id, error = %e, "skipping unreadable run"),
        }
    }

    if runs.is_empty() && matches!(format, OutputFormat::Text) {
        println!("No runs");
        return Ok(());
    }
    if matches!(format, OutputFormat::Text) {
        println!("{:<38} {:<8} CREATED", "ID", "STAGE");
    }
    output::print_list(&runs, format);
    Ok(())
}

/// Stored state of a finished run; `None` while the run is still active
///
/// Finished runs never change, so they are answered without a cluster.
fn finished_state(run_id: &RunId, config: &Config) -> Result<Option<RunState>> {
    let record = super::store(config)?
        .load(run_id)
        .map_err(|e| engine_error(EngineError::from(e)))?;
    Ok((!record.state.is_active()).then_some(record.state))
}
