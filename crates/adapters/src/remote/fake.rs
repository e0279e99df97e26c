// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake remote cluster for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{RemoteClient, RemoteError, RemoteStatus};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Recorded remote call
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCall {
    Create { specification: Value },
    Start { workflow_id: String },
    Stop { workflow_id: String },
    Status { workflow_id: String },
    Upload {
        workflow_id: String,
        source: PathBuf,
        target: String,
    },
    Download { workflow_id: String, source: String },
}

impl RemoteCall {
    pub fn op(&self) -> RemoteOp {
        match self {
            RemoteCall::Create { .. } => RemoteOp::Create,
            RemoteCall::Start { .. } => RemoteOp::Start,
            RemoteCall::Stop { .. } => RemoteOp::Stop,
            RemoteCall::Status { .. } => RemoteOp::Status,
            RemoteCall::Upload { .. } => RemoteOp::Upload,
            RemoteCall::Download { .. } => RemoteOp::Download,
        }
    }
}

/// Kind of remote operation, used for failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOp {
    Create,
    Start,
    Stop,
    Status,
    Upload,
    Download,
}

#[derive(Default)]
struct FakeState {
    calls: Vec<RemoteCall>,
    workflow_count: u64,
    statuses: VecDeque<RemoteStatus>,
    last_status: Option<RemoteStatus>,
    files: HashMap<String, Vec<u8>>,
    uploads: HashMap<String, Vec<u8>>,
    failures: HashMap<RemoteOp, String>,
}

/// Fake remote client for testing
///
/// Status reports are scripted with `push_status`; once the script runs out
/// the last report repeats (`created` before any report).
#[derive(Clone, Default)]
pub struct FakeRemoteClient {
    state: Arc<Mutex<FakeState>>,
}

impl FakeRemoteClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next status report
    pub fn push_status(&self, status: RemoteStatus) {
        self.lock().statuses.push_back(status);
    }

    /// Make a result file available for download
    pub fn set_file(&self, name: &str, content: &[u8]) {
        self.lock().files.insert(name.to_string(), content.to_vec());
    }

    /// Make every call of `op` fail until cleared
    pub fn fail(&self, op: RemoteOp, message: &str) {
        self.lock().failures.insert(op, message.to_string());
    }

    pub fn clear_failure(&self, op: RemoteOp) {
        self.lock().failures.remove(&op);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<RemoteCall> {
        self.lock().calls.clone()
    }

    /// Number of recorded calls of one kind
    pub fn count(&self, op: RemoteOp) -> usize {
        self.lock().calls.iter().filter(|c| c.op() == op).count()
    }

    /// Contents uploaded to a workspace target
    pub fn uploaded(&self, target: &str) -> Option<Vec<u8>> {
        self.lock().uploads.get(target).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Record a call and apply any injected failure
    fn record(&self, call: RemoteCall) -> Result<(), RemoteError> {
        let mut state = self.lock();
        let op = call.op();
        state.calls.push(call);
        match state.failures.get(&op) {
            Some(message) => Err(RemoteError::Transport(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RemoteClient for FakeRemoteClient {
    async fn create_workflow(&self, specification: &Value) -> Result<String, RemoteError> {
        self.record(RemoteCall::Create {
            specification: specification.clone(),
        })?;
        let mut state = self.lock();
        state.workflow_count += 1;
        Ok(format!("wf-{}", state.workflow_count))
    }

    async fn start_workflow(&self, workflow_id: &str) -> Result<(), RemoteError> {
        self.record(RemoteCall::Start {
            workflow_id: workflow_id.to_string(),
        })
    }

    async fn stop_workflow(&self, workflow_id: &str) -> Result<(), RemoteError> {
        self.record(RemoteCall::Stop {
            workflow_id: workflow_id.to_string(),
        })
    }

    async fn get_status(&self, workflow_id: &str) -> Result<RemoteStatus, RemoteError> {
        self.record(RemoteCall::Status {
            workflow_id: workflow_id.to_string(),
        })?;
        let mut state = self.lock();
        if let Some(next) = state.statuses.pop_front() {
            state.last_status = Some(next);
        }
        Ok(state
            .last_status
            .clone()
            .unwrap_or_else(|| RemoteStatus::new("created")))
    }

    async fn upload_file(
        &self,
        workflow_id: &str,
        source: &Path,
        target: &str,
    ) -> Result<(), RemoteError> {
        self.record(RemoteCall::Upload {
            workflow_id: workflow_id.to_string(),
            source: source.to_path_buf(),
            target: target.to_string(),
        })?;
        let content = tokio::fs::read(source).await?;
        self.lock().uploads.insert(target.to_string(), content);
        Ok(())
    }

    async fn download_file(&self, workflow_id: &str, source: &str) -> Result<Vec<u8>, RemoteError> {
        self.record(RemoteCall::Download {
            workflow_id: workflow_id.to_string(),
            source: source.to_string(),
        })?;
        self.lock()
            .files
            .get(source)
            .cloned()
            .ok_or_else(|| RemoteError::Status {
                code: 404,
                message: format!("file {} not found", source),
            })
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
