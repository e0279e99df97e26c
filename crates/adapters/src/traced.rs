// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrapper for consistent observability

use crate::remote::{RemoteClient, RemoteError, RemoteStatus};
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;
use std::time::Instant;
use tracing::Instrument;

/// Wrapper that adds tracing to any RemoteClient
#[derive(Clone)]
pub struct TracedRemoteClient<R> {
    inner: R,
}

impl<R> TracedRemoteClient<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }
}

#[async_trait]
impl<R: RemoteClient> RemoteClient for TracedRemoteClient<R> {
    async fn create_workflow(&self, specification: &Value) -> Result<String, RemoteError> {
        let span = tracing::info_span!("remote.create");
        async {
            tracing::info!("creating workflow");

            let start = Instant::now();
            let result = self.inner.create_workflow(specification).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(workflow_id) => tracing::info!(workflow_id, elapsed_ms, "workflow created"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "create failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn start_workflow(&self, workflow_id: &str) -> Result<(), RemoteError> {
        let span = tracing::info_span!("remote.start", workflow_id);
        async {
            let result = self.inner.start_workflow(workflow_id).await;
            match &result {
                Ok(()) => tracing::info!("started"),
                Err(e) => tracing::error!(error = %e, "start failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn stop_workflow(&self, workflow_id: &str) -> Result<(), RemoteError> {
        let span = tracing::info_span!("remote.stop", workflow_id);
        async {
            let result = self.inner.stop_workflow(workflow_id).await;
            // stop failing is often acceptable (workflow already finished)
            match &result {
                Ok(()) => tracing::info!("stopped"),
                Err(e) => tracing::warn!(error = %e, "stop failed (may be expected)"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn get_status(&self, workflow_id: &str) -> Result<RemoteStatus, RemoteError> {
        let span = tracing::debug_span!("remote.status", workflow_id);
        async {
            let start = Instant::now();
            let result = self.inner.get_status(workflow_id).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(status) => tracing::debug!(
                    status = %status.status,
                    has_logs = status.logs.is_some(),
                    elapsed_ms,
                    "polled"
                ),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "status failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn upload_file(
        &self,
        workflow_id: &str,
        source: &Path,
        target: &str,
    ) -> Result<(), RemoteError> {
        let span = tracing::info_span!("remote.upload", workflow_id, target);
        async {
            // Precondition: source must be a local file
            if !source.is_file() {
                tracing::error!(source = %source.display(), "upload source is not a file");
                return Err(RemoteError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("upload source is not a file: {}", source.display()),
                )));
            }

            let start = Instant::now();
            let result = self.inner.upload_file(workflow_id, source, target).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(()) => tracing::debug!(elapsed_ms, "uploaded"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "upload failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn download_file(&self, workflow_id: &str, source: &str) -> Result<Vec<u8>, RemoteError> {
        let span = tracing::info_span!("remote.download", workflow_id, source);
        async {
            let start = Instant::now();
            let result = self.inner.download_file(workflow_id, source).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(content) => tracing::debug!(bytes = content.len(), elapsed_ms, "downloaded"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "download failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
