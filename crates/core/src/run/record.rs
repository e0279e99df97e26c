// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persisted per-run record

use super::state::{Resources, RunState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Everything the controller keeps about one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Identifier assigned by the remote cluster; only ever echoed back
    #[serde(rename = "workflowId")]
    pub workflow_id: String,
    /// Output files the workflow promises to produce, fixed at creation
    pub outputs: BTreeSet<String>,
    pub state: RunState,
}

impl RunRecord {
    /// Record for a run that was just started remotely
    pub fn new(
        workflow_id: impl Into<String>,
        outputs: impl IntoIterator<Item = String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            outputs: outputs.into_iter().collect(),
            state: RunState::pending(created_at),
        }
    }

    /// Materialized outputs; empty unless the run succeeded
    pub fn resources(&self) -> Resources {
        self.state.resources().cloned().unwrap_or_default()
    }

    /// Copy of this record with its state replaced
    pub fn with_state(&self, state: RunState) -> Self {
        Self {
            workflow_id: self.workflow_id.clone(),
            outputs: self.outputs.clone(),
            state,
        }
    }

    /// Resources are present only on success, and then cover exactly the
    /// declared outputs
    pub fn resources_match_outputs(&self) -> bool {
        match self.state.resources() {
            Some(resources) => resources.keys().eq(self.outputs.iter()),
            None => true,
        }
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
