// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run-state reconciliation
//!
//! The engine never polls on its own. Callers drive each run by calling
//! [`Engine::get_state`] repeatedly; every call performs at most one remote
//! status request and at most one record write.

use crate::upload::expand_uploads;
use crate::EngineError;
use rr_adapters::{RemoteClient, RemoteStatus};
use rr_core::{
    Clock, IdGen, Resources, RunId, RunRecord, RunState, StatusVocabulary, Transition,
    WorkflowSpec,
};
use rr_storage::RunStore;
use tracing::Instrument;

/// Message recorded when the remote cluster reports a failure without logs
pub const UNKNOWN_REASON: &str = "unknown reason";

/// Message recorded for runs canceled through [`Engine::cancel_run`]
pub const CANCELED_BY_USER: &str = "canceled by user";

/// Drives local run records toward the state of their remote workflows
pub struct Engine<R, C: Clock, I: IdGen> {
    remote: R,
    store: RunStore,
    vocabulary: StatusVocabulary,
    clock: C,
    id_gen: I,
}

impl<R, C, I> Engine<R, C, I>
where
    R: RemoteClient,
    C: Clock,
    I: IdGen,
{
    /// Create an engine using the REANA status vocabulary
    pub fn new(remote: R, store: RunStore, clock: C, id_gen: I) -> Self {
        Self {
            remote,
            store,
            vocabulary: StatusVocabulary::reana(),
            clock,
            id_gen,
        }
    }

    /// Replace the status vocabulary used to interpret remote reports
    pub fn with_vocabulary(mut self, vocabulary: StatusVocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    pub fn store(&self) -> &RunStore {
        &self.store
    }

    /// Create, populate and start a remote workflow, returning the new run id
    ///
    /// If anything fails after the run directory was created, the directory
    /// is removed and the original error is returned.
    pub async fn execute(&self, spec: &WorkflowSpec) -> Result<RunId, EngineError> {
        let run_id = self.id_gen.next();
        let span = tracing::info_span!("execute", run_id = %run_id);

        async move {
            let workflow_id = self.remote.create_workflow(&spec.specification).await?;
            self.store.create(&run_id)?;

            if let Err(e) = self.submit(&run_id, &workflow_id, spec).await {
                tracing::warn!(error = %e, "run creation failed, rolling back");
                if let Err(cleanup) = self.store.destroy(&run_id) {
                    tracing::error!(error = %cleanup, "failed to remove run directory");
                }
                return Err(e);
            }

            tracing::info!(workflow_id, outputs = spec.outputs.len(), "run submitted");
            Ok(run_id)
        }
        .instrument(span)
        .await
    }

    async fn submit(
        &self,
        run_id: &RunId,
        workflow_id: &str,
        spec: &WorkflowSpec,
    ) -> Result<(), EngineError> {
        for file in expand_uploads(&spec.uploads)? {
            self.remote
                .upload_file(workflow_id, &file.source, &file.target)
                .await?;
        }
        self.remote.start_workflow(workflow_id).await?;

        let record = RunRecord::new(workflow_id, spec.outputs.iter().cloned(), self.clock.now());
        self.store.save(run_id, &record)?;
        Ok(())
    }

    /// Current state of a run, reconciled against the remote cluster
    ///
    /// Terminal states are returned as stored without contacting the remote
    /// side. Any failure leaves the stored record as it was, so the call can
    /// simply be repeated.
    pub async fn get_state(&self, run_id: &RunId) -> Result<RunState, EngineError> {
        let record = self.store.load(run_id)?;
        if !record.state.is_active() {
            return Ok(record.state);
        }

        let span = tracing::info_span!("reconcile", run_id = %run_id);
        async move {
            let report = self.remote.get_status(&record.workflow_id).await?;
            let current = record.state.stage();

            let state = match self.vocabulary.classify(&report.status, current) {
                Transition::NoChange => {
                    if self.vocabulary.categorize(&report.status).is_none() {
                        tracing::warn!(status = %report.status, "unrecognized remote status");
                    }
                    return Ok(record.state);
                }
                Transition::Running => record.state.to_running(self.clock.now()),
                Transition::Error => record
                    .state
                    .to_error(failure_messages(&report), self.clock.now()),
                Transition::Success => {
                    let resources = self.download_outputs(run_id, &record).await?;
                    record.state.to_success(resources, self.clock.now())
                }
            };

            self.commit(run_id, &record, state)
        }
        .instrument(span)
        .await
    }

    /// Stop a run and mark it failed
    ///
    /// Canceling a finished run is a no-op. A rejected stop request does not
    /// prevent the local transition.
    pub async fn cancel_run(&self, run_id: &RunId) -> Result<RunState, EngineError> {
        let record = self.store.load(run_id)?;
        if !record.state.is_active() {
            return Ok(record.state);
        }

        let span = tracing::info_span!("cancel", run_id = %run_id);
        async move {
            if record.state.is_running() {
                if let Err(e) = self.remote.stop_workflow(&record.workflow_id).await {
                    tracing::warn!(error = %e, "stop request failed, canceling locally");
                }
            }

            let state = record
                .state
                .to_error(vec![CANCELED_BY_USER.to_string()], self.clock.now());
            self.commit(run_id, &record, state)
        }
        .instrument(span)
        .await
    }

    /// Stored record of a run, without reconciling it
    pub fn get_record(&self, run_id: &RunId) -> Result<RunRecord, EngineError> {
        Ok(self.store.load(run_id)?)
    }

    /// IDs of all stored runs
    pub fn list_runs(&self) -> Result<Vec<RunId>, EngineError> {
        Ok(self.store.list()?)
    }

    /// Download every declared output into the run's result directory
    async fn download_outputs(
        &self,
        run_id: &RunId,
        record: &RunRecord,
    ) -> Result<Resources, EngineError> {
        let mut resources = Resources::new();
        for name in &record.outputs {
            let content = self.remote.download_file(&record.workflow_id, name).await?;
            let path = self.store.write_result(run_id, name, &content)?;
            resources.insert(name.clone(), path);
        }
        Ok(resources)
    }

    fn commit(
        &self,
        run_id: &RunId,
        record: &RunRecord,
        state: RunState,
    ) -> Result<RunState, EngineError> {
        let updated = record.with_state(state);
        self.store.save(run_id, &updated)?;
        tracing::info!(
            from = %record.state.stage(),
            to = %updated.state.stage(),
            "run state changed"
        );
        Ok(updated.state)
    }
}

/// Error messages for a failed remote workflow
fn failure_messages(report: &RemoteStatus) -> Vec<String> {
    match report.logs.as_deref() {
        Some(logs) if !logs.trim().is_empty() => vec![logs.to_string()],
        _ => vec![UNKNOWN_REASON.to_string()],
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
