// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! REANA cluster client over the REST API

use super::{RemoteClient, RemoteError, RemoteStatus};
use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use ureq::http::Response;
use ureq::{Agent, Body};

/// Name given to workflows when none is configured
pub const DEFAULT_WORKFLOW_NAME: &str = "flowserv";

/// Largest result file accepted from the workspace
const DOWNLOAD_LIMIT: u64 = 1024 * 1024 * 1024;

/// Bytes left unescaped inside one URL path segment
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Connection settings for a REANA cluster
#[derive(Debug, Clone)]
pub struct ReanaConfig {
    /// Base URL of the cluster, e.g. `https://reana.example.org`
    pub server_url: String,
    pub access_token: String,
    /// Name (prefix) for every workflow created by this client
    pub workflow_name: String,
    /// Upper bound for a single request
    pub timeout: Duration,
}

impl ReanaConfig {
    pub fn new(server_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            access_token: access_token.into(),
            workflow_name: DEFAULT_WORKFLOW_NAME.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Full URL for an API path such as `workflows/{id}/status`
    pub fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.server_url.trim_end_matches('/'), path)
    }
}

#[derive(Debug, Deserialize)]
struct CreatedWorkflow {
    workflow_id: String,
}

/// Client for a REANA cluster
///
/// Requests are blocking and run on tokio's blocking thread pool.
#[derive(Clone)]
pub struct ReanaClient {
    config: Arc<ReanaConfig>,
    agent: Agent,
}

impl ReanaClient {
    pub fn new(config: ReanaConfig) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self {
            config: Arc::new(config),
            agent,
        }
    }

    pub fn config(&self) -> &ReanaConfig {
        &self.config
    }

    async fn blocking<T, F>(&self, request: F) -> Result<T, RemoteError>
    where
        T: Send + 'static,
        F: FnOnce(&Agent, &ReanaConfig) -> Result<T, RemoteError> + Send + 'static,
    {
        let agent = self.agent.clone();
        let config = Arc::clone(&self.config);
        tokio::task::spawn_blocking(move || request(&agent, &config))
            .await
            .map_err(|e| RemoteError::Transport(format!("request task failed: {}", e)))?
    }
}

#[async_trait]
impl RemoteClient for ReanaClient {
    async fn create_workflow(&self, specification: &Value) -> Result<String, RemoteError> {
        let specification = specification.clone();
        self.blocking(move |agent, config| {
            let body = json!({
                "reana_specification": specification,
                "workflow_name": config.workflow_name,
            });
            let response = agent
                .post(&config.url("workflows"))
                .query("access_token", &config.access_token)
                .query("workflow_name", &config.workflow_name)
                .send_json(&body)
                .map_err(transport)?;
            let created: CreatedWorkflow = read_json(check(response)?)?;
            Ok(created.workflow_id)
        })
        .await
    }

    async fn start_workflow(&self, workflow_id: &str) -> Result<(), RemoteError> {
        let path = format!("workflows/{}/start", segment(workflow_id));
        self.blocking(move |agent, config| {
            let response = agent
                .post(&config.url(&path))
                .query("access_token", &config.access_token)
                .send_json(json!({}))
                .map_err(transport)?;
            check(response).map(drop)
        })
        .await
    }

    async fn stop_workflow(&self, workflow_id: &str) -> Result<(), RemoteError> {
        let path = format!("workflows/{}/status", segment(workflow_id));
        self.blocking(move |agent, config| {
            let response = agent
                .put(&config.url(&path))
                .query("access_token", &config.access_token)
                .query("status", "stop")
                .send_json(json!({ "force_stop": true }))
                .map_err(transport)?;
            check(response).map(drop)
        })
        .await
    }

    async fn get_status(&self, workflow_id: &str) -> Result<RemoteStatus, RemoteError> {
        let path = format!("workflows/{}/status", segment(workflow_id));
        self.blocking(move |agent, config| {
            let response = agent
                .get(&config.url(&path))
                .query("access_token", &config.access_token)
                .call()
                .map_err(transport)?;
            read_json(check(response)?)
        })
        .await
    }

    async fn upload_file(
        &self,
        workflow_id: &str,
        source: &Path,
        target: &str,
    ) -> Result<(), RemoteError> {
        let path = format!("workflows/{}/workspace", segment(workflow_id));
        let source = source.to_path_buf();
        let target = target.to_string();
        self.blocking(move |agent, config| {
            let content = std::fs::read(&source)?;
            let response = agent
                .post(&config.url(&path))
                .query("access_token", &config.access_token)
                .query("file_name", &target)
                .header("Content-Type", "application/octet-stream")
                .send(&content[..])
                .map_err(transport)?;
            check(response).map(drop)
        })
        .await
    }

    async fn download_file(&self, workflow_id: &str, source: &str) -> Result<Vec<u8>, RemoteError> {
        let path = format!(
            "workflows/{}/workspace/{}",
            segment(workflow_id),
            encode_path(source)
        );
        self.blocking(move |agent, config| {
            let response = agent
                .get(&config.url(&path))
                .query("access_token", &config.access_token)
                .call()
                .map_err(transport)?;
            check(response)?
                .body_mut()
                .with_config()
                .limit(DOWNLOAD_LIMIT)
                .read_to_vec()
                .map_err(|e| RemoteError::Transport(format!("failed to read file: {}", e)))
        })
        .await
    }
}

fn segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// Escape each `/`-separated component of a workspace path
fn encode_path(path: &str) -> String {
    path.split('/').map(segment).collect::<Vec<_>>().join("/")
}

fn transport(e: ureq::Error) -> RemoteError {
    RemoteError::Transport(e.to_string())
}

/// Turn non-2xx responses into `RemoteError::Status`
fn check(mut response: Response<Body>) -> Result<Response<Body>, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.body_mut().read_to_string().unwrap_or_default();
    Err(RemoteError::Status {
        code: status.as_u16(),
        message: error_message(&body),
    })
}

fn read_json<T: serde::de::DeserializeOwned>(mut response: Response<Body>) -> Result<T, RemoteError> {
    response
        .body_mut()
        .read_json()
        .map_err(|e| RemoteError::Protocol(e.to_string()))
}

/// Prefer the `message` field REANA puts in error bodies
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
#[path = "reana_tests.rs"]
mod tests;
