// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote status classification
//!
//! The remote cluster reports status as free-form tokens and uses several
//! synonyms for the same condition. Tokens are grouped into a vocabulary
//! table, and the classifier maps a token plus the current stage onto the
//! transition the engine should make.

use crate::run::RunStage;

/// Default REANA status vocabulary
const REANA_STATUSES: &[(RunStage, &[&str])] = &[
    (RunStage::Pending, &["created", "queued"]),
    (RunStage::Running, &["running"]),
    (RunStage::Error, &["failed", "stopped", "deleted"]),
    (RunStage::Success, &["finished"]),
];

/// Outcome of classifying one remote status report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing to record
    NoChange,
    Running,
    Error,
    Success,
}

impl Transition {
    /// Stage the run moves to, if any
    pub fn target(self) -> Option<RunStage> {
        match self {
            Transition::NoChange => None,
            Transition::Running => Some(RunStage::Running),
            Transition::Error => Some(RunStage::Error),
            Transition::Success => Some(RunStage::Success),
        }
    }
}

/// Table of raw status tokens grouped by the stage they mean
#[derive(Debug, Clone)]
pub struct StatusVocabulary {
    entries: Vec<(String, RunStage)>,
}

impl StatusVocabulary {
    /// Vocabulary with no tokens; everything classifies as `NoChange`
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Vocabulary used by REANA clusters
    pub fn reana() -> Self {
        let mut vocabulary = Self::empty();
        for (stage, tokens) in REANA_STATUSES {
            for token in *tokens {
                vocabulary = vocabulary.with_synonym(*stage, token);
            }
        }
        vocabulary
    }

    /// Register an additional token for a stage
    ///
    /// A token already in the table is moved to the new stage.
    pub fn with_synonym(mut self, stage: RunStage, token: &str) -> Self {
        let token = normalize(token);
        self.entries.retain(|(t, _)| *t != token);
        self.entries.push((token, stage));
        self
    }

    /// Stage a raw token stands for, or `None` if the token is unknown
    pub fn categorize(&self, token: &str) -> Option<RunStage> {
        let token = normalize(token);
        self.entries
            .iter()
            .find(|(t, _)| *t == token)
            .map(|(_, stage)| *stage)
    }

    /// Map a remote status onto a transition from the current stage
    ///
    /// Rules are checked in order and the first match wins; unknown tokens
    /// and terminal stages never produce a transition.
    pub fn classify(&self, status: &str, current: RunStage) -> Transition {
        match (self.categorize(status), current) {
            (Some(RunStage::Running), RunStage::Pending) => Transition::Running,
            (Some(RunStage::Error), stage) if stage.is_active() => Transition::Error,
            (Some(RunStage::Success), stage) if stage.is_active() => Transition::Success,
            _ => Transition::NoChange,
        }
    }
}

impl Default for StatusVocabulary {
    fn default() -> Self {
        Self::reana()
    }
}

fn normalize(token: &str) -> String {
    token.trim().to_ascii_lowercase()
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
