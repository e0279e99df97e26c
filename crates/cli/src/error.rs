// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! This module provides enhanced error types that include:
//! - What went wrong (message)
//! - Why it might have happened (context)
//! - How to fix it (suggestions)

use crate::config::{ConfigError, ENV_ACCESS_TOKEN, ENV_SERVER_URL};
use rr_engine::EngineError;
use rr_storage::StoreError;
use std::fmt;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct RrError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl RrError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    /// Add context about why this error might have happened.
    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    /// Add a suggestion for how to fix this error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Set the source error that caused this error.
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for RrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for RrError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Common error builders for typical failure scenarios.
impl RrError {
    /// Error for when a run cannot be found.
    pub fn unknown_run(run_id: &str) -> Self {
        RrError::new(format!("Run '{}' not found", run_id))
            .with_context("No record exists for this run in the configured base directory")
            .with_suggestion("List known runs: rr list")
            .with_suggestion("Check the base directory: --base-dir or RR_BASE_DIR")
    }

    /// Error for when the remote cluster is not configured.
    pub fn remote_not_configured(error: ConfigError) -> Self {
        let (variable, field) = match error {
            ConfigError::MissingServerUrl => (ENV_SERVER_URL, "server_url"),
            _ => (ENV_ACCESS_TOKEN, "access_token"),
        };
        RrError::new(error.to_string())
            .with_context("This command talks to the REANA cluster")
            .with_suggestion(format!("Set {} in the environment", variable))
            .with_suggestion(format!("Or set {} in the config file", field))
            .with_source(error)
    }

    /// Error for when a stored record cannot be parsed.
    pub fn corrupt_record(run_id: &str, error: StoreError) -> Self {
        RrError::new(format!("Record of run '{}' is corrupt", run_id))
            .with_context(error.to_string())
            .with_context("Records are never repaired automatically")
            .with_suggestion(format!("Inspect the file: {}/state.json", run_id))
            .with_source(error)
    }
}

/// Translate an engine failure into a user-facing error
pub fn engine_error(error: EngineError) -> anyhow::Error {
    match error {
        EngineError::UnknownRun(id) => RrError::unknown_run(id.as_str()).into(),
        EngineError::Storage(StoreError::Corrupt { run_id, source }) => {
            let id = run_id.to_string();
            RrError::corrupt_record(&id, StoreError::Corrupt { run_id, source }).into()
        }
        EngineError::Remote(e) => RrError::new("REANA request failed")
            .with_context(e.to_string())
            .with_suggestion("Check the server URL and access token")
            .with_suggestion("Retry the command; status queries are safe to repeat")
            .with_source(e)
            .into(),
        other => anyhow::Error::new(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rr_adapters::RemoteError;
    use rr_core::RunId;

    #[test]
    fn test_error_display() {
        let err = RrError::new("Something went wrong")
            .with_context("First context")
            .with_context("Second context")
            .with_suggestion("Try this")
            .with_suggestion("Or this");

        let output = format!("{}", err);
        assert!(output.contains("error: Something went wrong"));
        assert!(output.contains("-> First context"));
        assert!(output.contains("-> Second context"));
        assert!(output.contains("1. Try this"));
        assert!(output.contains("2. Or this"));
    }

    #[test]
    fn test_unknown_run_suggests_list() {
        let err = engine_error(EngineError::UnknownRun(RunId::from("does-not-exist")));
        let output = format!("{}", err);
        assert!(output.contains("Run 'does-not-exist' not found"));
        assert!(output.contains("rr list"));
    }

    #[test]
    fn test_remote_error_keeps_cause() {
        let err = engine_error(EngineError::Remote(RemoteError::Status {
            code: 403,
            message: "invalid token".to_string(),
        }));
        let output = format!("{}", err);
        assert!(output.contains("remote returned 403: invalid token"));
    }

    #[test]
    fn test_missing_token_names_variable() {
        let output = format!(
            "{}",
            RrError::remote_not_configured(ConfigError::MissingAccessToken)
        );
        assert!(output.contains("REANA_ACCESS_TOKEN"));
        assert!(output.contains("access_token"));
    }
}
