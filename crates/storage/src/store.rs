// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Directory-per-run record store
//!
//! Layout for a run `R` beneath the base directory:
//!
//! ```text
//! <base>/<R>/state.json   record (workflow id, outputs, state)
//! <base>/<R>/files/...    downloaded result files
//! ```

use crate::atomic::write_atomic;
use rr_core::{is_safe_relative_path, RunId, RunRecord};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the record file inside a run directory
pub const STATE_FILE: &str = "state.json";

/// Name of the result file subdirectory inside a run directory
pub const FILES_DIR: &str = "files";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unknown run: {0}")]
    UnknownRun(RunId),
    #[error("run already exists: {0}")]
    AlreadyExists(RunId),
    #[error("invalid run id: '{0}'")]
    InvalidRunId(RunId),
    #[error("invalid result file name: '{0}'")]
    InvalidResultName(String),
    #[error("corrupt record for run {run_id}: {source}")]
    Corrupt {
        run_id: RunId,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode record: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Directory of a single run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDir {
    pub id: RunId,
    pub path: PathBuf,
}

impl RunDir {
    pub fn state_file(&self) -> PathBuf {
        self.path.join(STATE_FILE)
    }

    pub fn files_dir(&self) -> PathBuf {
        self.path.join(FILES_DIR)
    }
}

/// Durable mapping from run id to run record
#[derive(Debug, Clone)]
pub struct RunStore {
    base_dir: PathBuf,
}

impl RunStore {
    /// Open a store at the given path, creating the directory if needed
    pub fn open(base_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Create the directory for a new run
    ///
    /// The result subdirectory exists before any record is written, and a
    /// directory without a record is not visible to `load`.
    pub fn create(&self, id: &RunId) -> Result<RunDir, StoreError> {
        let dir = self
            .run_dir(id)
            .ok_or_else(|| StoreError::InvalidRunId(id.clone()))?;

        fs::create_dir(&dir.path).map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => StoreError::AlreadyExists(id.clone()),
            _ => StoreError::Io(e),
        })?;

        if let Err(e) = fs::create_dir(dir.files_dir()) {
            let _ = fs::remove_dir_all(&dir.path);
            return Err(e.into());
        }

        tracing::debug!(run_id = %id, path = %dir.path.display(), "created run directory");
        Ok(dir)
    }

    /// Load the record of a run
    pub fn load(&self, id: &RunId) -> Result<RunRecord, StoreError> {
        let dir = self.existing_dir(id)?;

        let content = match fs::read(dir.state_file()) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::UnknownRun(id.clone()))
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&content).map_err(|source| StoreError::Corrupt {
            run_id: id.clone(),
            source,
        })
    }

    /// Replace the record of a run
    ///
    /// Readers never observe a partially written record.
    pub fn save(&self, id: &RunId, record: &RunRecord) -> Result<(), StoreError> {
        let dir = self.existing_dir(id)?;
        let content = serde_json::to_vec_pretty(record).map_err(StoreError::Encode)?;
        write_atomic(&dir.state_file(), &content)?;

        tracing::debug!(run_id = %id, stage = %record.state.stage(), "saved run record");
        Ok(())
    }

    /// Local location of a declared result file
    pub fn result_path(&self, id: &RunId, name: &str) -> Result<PathBuf, StoreError> {
        let dir = self
            .run_dir(id)
            .ok_or_else(|| StoreError::UnknownRun(id.clone()))?;
        if !is_safe_relative_path(name) {
            return Err(StoreError::InvalidResultName(name.to_string()));
        }
        Ok(dir.files_dir().join(name))
    }

    /// Write a downloaded result file, creating intermediate directories
    pub fn write_result(
        &self,
        id: &RunId,
        name: &str,
        content: &[u8],
    ) -> Result<PathBuf, StoreError> {
        self.existing_dir(id)?;
        let path = self.result_path(id, name)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        write_atomic(&path, content)?;
        Ok(path)
    }

    /// Remove a run directory and everything in it
    pub fn destroy(&self, id: &RunId) -> Result<(), StoreError> {
        let Some(dir) = self.run_dir(id) else {
            return Ok(());
        };
        match fs::remove_dir_all(&dir.path) {
            Ok(()) => {
                tracing::debug!(run_id = %id, "removed run directory");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// IDs of all runs with a committed record, sorted
    pub fn list(&self) -> Result<Vec<RunId>, StoreError> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            if entry.path().join(STATE_FILE).is_file() {
                ids.push(RunId(name));
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Check if a run has a committed record
    pub fn exists(&self, id: &RunId) -> bool {
        self.run_dir(id)
            .map(|dir| dir.state_file().is_file())
            .unwrap_or(false)
    }

    /// Directory for a run id; `None` if the id is not a single path component
    fn run_dir(&self, id: &RunId) -> Option<RunDir> {
        let name = id.as_str();
        let single_component = is_safe_relative_path(name) && !name.contains(['/', '\\']);
        if !single_component || name.starts_with('.') {
            return None;
        }
        Some(RunDir {
            id: id.clone(),
            path: self.base_dir.join(name),
        })
    }

    fn existing_dir(&self, id: &RunId) -> Result<RunDir, StoreError> {
        self.run_dir(id)
            .filter(|dir| dir.path.is_dir())
            .ok_or_else(|| StoreError::UnknownRun(id.clone()))
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
