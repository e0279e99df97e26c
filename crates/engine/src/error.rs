// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the reconciliation engine

use rr_adapters::RemoteError;
use rr_core::RunId;
use rr_storage::StoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the engine
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unknown run: {0}")]
    UnknownRun(RunId),
    #[error("run already exists: {0}")]
    AlreadyExists(RunId),
    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),
    #[error("storage error: {0}")]
    Storage(StoreError),
    #[error("cannot read upload source {}: {source}", .path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<StoreError> for EngineError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UnknownRun(id) => EngineError::UnknownRun(id),
            StoreError::AlreadyExists(id) => EngineError::AlreadyExists(id),
            other => EngineError::Storage(other),
        }
    }
}
