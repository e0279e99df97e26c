// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run state machine
//!
//! A run only ever advances Pending -> Running -> {Error, Success}. Every
//! transition keeps the `created_at` and `started_at` of the state it
//! replaces. Error and Success are terminal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Map from declared output name to the downloaded local file
pub type Resources = BTreeMap<String, PathBuf>;

/// Lifecycle stage of a run, without the stage payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStage {
    Pending,
    Running,
    Error,
    Success,
}

impl RunStage {
    /// Position in the lifecycle; Error and Success share the terminal rank
    pub fn rank(self) -> u8 {
        match self {
            RunStage::Pending => 0,
            RunStage::Running => 1,
            RunStage::Error | RunStage::Success => 2,
        }
    }

    pub fn is_active(self) -> bool {
        matches!(self, RunStage::Pending | RunStage::Running)
    }

    pub fn name(self) -> &'static str {
        match self {
            RunStage::Pending => "pending",
            RunStage::Running => "running",
            RunStage::Error => "error",
            RunStage::Success => "success",
        }
    }
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// State of a single run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum RunState {
    /// Created remotely, not yet observed running
    Pending { created_at: DateTime<Utc> },
    /// The remote cluster confirmed active execution
    Running {
        created_at: DateTime<Utc>,
        started_at: DateTime<Utc>,
    },
    /// Terminated abnormally, messages kept in report order
    Error {
        created_at: DateTime<Utc>,
        started_at: DateTime<Utc>,
        stopped_at: DateTime<Utc>,
        messages: Vec<String>,
    },
    /// Terminated normally with materialized outputs
    Success {
        created_at: DateTime<Utc>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        resources: Resources,
    },
}

impl RunState {
    /// Initial state of a freshly created run
    pub fn pending(created_at: DateTime<Utc>) -> Self {
        RunState::Pending { created_at }
    }

    pub fn stage(&self) -> RunStage {
        match self {
            RunState::Pending { .. } => RunStage::Pending,
            RunState::Running { .. } => RunStage::Running,
            RunState::Error { .. } => RunStage::Error,
            RunState::Success { .. } => RunStage::Success,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            RunState::Pending { created_at }
            | RunState::Running { created_at, .. }
            | RunState::Error { created_at, .. }
            | RunState::Success { created_at, .. } => *created_at,
        }
    }

    /// Start time, if the run was ever observed running
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        match self {
            RunState::Pending { .. } => None,
            RunState::Running { started_at, .. }
            | RunState::Error { started_at, .. }
            | RunState::Success { started_at, .. } => Some(*started_at),
        }
    }

    /// Time the run reached a terminal stage
    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        match self {
            RunState::Error { stopped_at, .. } => Some(*stopped_at),
            RunState::Success { finished_at, .. } => Some(*finished_at),
            _ => None,
        }
    }

    /// True for Pending and Running
    pub fn is_active(&self) -> bool {
        self.stage().is_active()
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, RunState::Pending { .. })
    }

    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, RunState::Error { .. })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RunState::Success { .. })
    }

    /// Error messages; empty unless the run failed
    pub fn messages(&self) -> &[String] {
        match self {
            RunState::Error { messages, .. } => messages,
            _ => &[],
        }
    }

    /// Materialized outputs; `None` unless the run succeeded
    pub fn resources(&self) -> Option<&Resources> {
        match self {
            RunState::Success { resources, .. } => Some(resources),
            _ => None,
        }
    }

    /// Transition to Running, keeping an existing start time
    pub fn to_running(&self, at: DateTime<Utc>) -> Self {
        RunState::Running {
            created_at: self.created_at(),
            started_at: self.started_at().unwrap_or(at),
        }
    }

    /// Transition to Error
    ///
    /// A run that was never seen running gets `started_at` backfilled to `at`.
    pub fn to_error(&self, messages: Vec<String>, at: DateTime<Utc>) -> Self {
        RunState::Error {
            created_at: self.created_at(),
            started_at: self.started_at().unwrap_or(at),
            stopped_at: at,
            messages,
        }
    }

    /// Transition to Success with the materialized outputs
    pub fn to_success(&self, resources: Resources, at: DateTime<Utc>) -> Self {
        RunState::Success {
            created_at: self.created_at(),
            started_at: self.started_at().unwrap_or(at),
            finished_at: at,
            resources,
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
