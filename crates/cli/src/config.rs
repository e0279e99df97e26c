// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI configuration
//!
//! Settings come from an optional TOML file, then environment variables,
//! then command-line flags, each layer overriding the previous one.

use rr_adapters::{ReanaConfig, DEFAULT_WORKFLOW_NAME};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming the cluster URL
pub const ENV_SERVER_URL: &str = "REANA_SERVER_URL";
/// Environment variable holding the access token
pub const ENV_ACCESS_TOKEN: &str = "REANA_ACCESS_TOKEN";
/// Environment variable naming the run directory
pub const ENV_BASE_DIR: &str = "RR_BASE_DIR";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("could not determine a data directory for run records")]
    NoDataDir,
    #[error("no REANA server URL configured")]
    MissingServerUrl,
    #[error("no REANA access token configured")]
    MissingAccessToken,
}

/// Contents of the configuration file; every field is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub base_dir: Option<PathBuf>,
    pub server_url: Option<String>,
    pub access_token: Option<String>,
    pub workflow_name: Option<String>,
    #[serde(with = "humantime_serde")]
    pub timeout: Option<Duration>,
    pub log_file: Option<PathBuf>,
}

impl FileConfig {
    /// Read an explicit config file, or the default one if it exists
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match default_config_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default())
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        Self::parse(&content, &path)
    }

    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub base_dir: PathBuf,
    pub server_url: Option<String>,
    pub access_token: Option<String>,
    pub workflow_name: String,
    pub timeout: Duration,
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the file, the process environment and flags
    pub fn load(path: Option<&Path>, base_dir: Option<PathBuf>) -> Result<Self, ConfigError> {
        let file = FileConfig::load(path)?;
        Self::resolve(file, |key| std::env::var(key).ok(), base_dir)
    }

    /// Layer environment and flag overrides on top of a config file
    pub fn resolve(
        file: FileConfig,
        env: impl Fn(&str) -> Option<String>,
        base_dir: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        let base_dir = match base_dir
            .or_else(|| non_empty(ENV_BASE_DIR).map(PathBuf::from))
            .or(file.base_dir)
        {
            Some(dir) => dir,
            None => default_base_dir().ok_or(ConfigError::NoDataDir)?,
        };

        Ok(Self {
            base_dir,
            server_url: non_empty(ENV_SERVER_URL).or(file.server_url),
            access_token: non_empty(ENV_ACCESS_TOKEN).or(file.access_token),
            workflow_name: file
                .workflow_name
                .unwrap_or_else(|| DEFAULT_WORKFLOW_NAME.to_string()),
            timeout: file.timeout.unwrap_or(DEFAULT_TIMEOUT),
            log_file: file.log_file,
        })
    }

    /// Connection settings for the remote cluster
    pub fn reana(&self) -> Result<ReanaConfig, ConfigError> {
        let server_url = self
            .server_url
            .clone()
            .ok_or(ConfigError::MissingServerUrl)?;
        let access_token = self
            .access_token
            .clone()
            .ok_or(ConfigError::MissingAccessToken)?;

        let mut reana = ReanaConfig::new(server_url, access_token);
        reana.workflow_name = self.workflow_name.clone();
        reana.timeout = self.timeout;
        Ok(reana)
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rr").join("config.toml"))
}

fn default_base_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("rr").join("runs"))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
