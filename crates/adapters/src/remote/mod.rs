// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote execution cluster adapters

mod reana;

pub use reana::{ReanaClient, ReanaConfig, DEFAULT_WORKFLOW_NAME};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeRemoteClient, RemoteCall, RemoteOp};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors from the remote cluster
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("remote returned {code}: {message}")]
    Status { code: u16, message: String },
    #[error("malformed response: {0}")]
    Protocol(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Status report for a remote workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteStatus {
    /// Raw status token, interpreted by the classifier
    pub status: String,
    /// Log output, present mostly for failed workflows
    #[serde(default)]
    pub logs: Option<String>,
}

impl RemoteStatus {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            logs: None,
        }
    }

    pub fn with_logs(mut self, logs: impl Into<String>) -> Self {
        self.logs = Some(logs.into());
        self
    }
}

/// Operations against a remote workflow execution cluster
#[async_trait]
pub trait RemoteClient: Clone + Send + Sync + 'static {
    /// Create a workflow from a concrete specification, returning its remote id
    async fn create_workflow(&self, specification: &serde_json::Value)
        -> Result<String, RemoteError>;

    /// Start execution of a created workflow
    async fn start_workflow(&self, workflow_id: &str) -> Result<(), RemoteError>;

    /// Stop a running workflow
    async fn stop_workflow(&self, workflow_id: &str) -> Result<(), RemoteError>;

    /// Current status of a workflow
    async fn get_status(&self, workflow_id: &str) -> Result<RemoteStatus, RemoteError>;

    /// Upload one local file into the workflow workspace
    async fn upload_file(
        &self,
        workflow_id: &str,
        source: &Path,
        target: &str,
    ) -> Result<(), RemoteError>;

    /// Download a file from the workflow workspace
    async fn download_file(&self, workflow_id: &str, source: &str)
        -> Result<Vec<u8>, RemoteError>;
}
