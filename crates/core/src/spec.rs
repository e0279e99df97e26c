// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workflow submissions
//!
//! A submission is a concrete remote specification together with the local
//! files to upload and the output files the workflow declares. Parameter
//! substitution happens before a submission is built.

use serde_json::Value;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Errors building a submission
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("invalid workflow type '{0}'")]
    UnsupportedType(String),
    #[error("invalid relative path: '{0}'")]
    InvalidPath(String),
    #[error("malformed specification: {0}")]
    Malformed(String),
}

/// A local file or directory to upload into the remote workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// Path on local disk
    pub source: PathBuf,
    /// Relative target in the remote workspace
    pub target: String,
}

impl UploadFile {
    pub fn new(source: impl Into<PathBuf>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Everything needed to create one run
#[derive(Debug, Clone)]
pub struct WorkflowSpec {
    /// Remote workflow specification, passed through unchanged
    pub specification: Value,
    pub uploads: Vec<UploadFile>,
    /// Relative names of the files the workflow produces
    pub outputs: Vec<String>,
}

impl WorkflowSpec {
    /// Build a submission, checking upload targets and output names
    pub fn new(
        specification: Value,
        uploads: Vec<UploadFile>,
        outputs: Vec<String>,
    ) -> Result<Self, SpecError> {
        for name in uploads.iter().map(|u| &u.target).chain(outputs.iter()) {
            if !is_safe_relative_path(name) {
                return Err(SpecError::InvalidPath(name.clone()));
            }
        }
        Ok(Self {
            specification,
            uploads,
            outputs,
        })
    }

    /// Build a submission from a REANA serial workflow specification
    ///
    /// Input files listed under `inputs.files` are resolved against
    /// `source_dir` and uploaded under the same relative name. Declared
    /// outputs come from `outputs.files`.
    pub fn from_serial(specification: Value, source_dir: &Path) -> Result<Self, SpecError> {
        let workflow_type = specification
            .pointer("/workflow/type")
            .and_then(Value::as_str)
            .unwrap_or("null");
        if workflow_type != "serial" {
            return Err(SpecError::UnsupportedType(workflow_type.to_string()));
        }

        let uploads = string_list(&specification, "/inputs/files")?
            .into_iter()
            .map(|name| UploadFile::new(source_dir.join(&name), name))
            .collect();
        let outputs = string_list(&specification, "/outputs/files")?;

        Self::new(specification, uploads, outputs)
    }
}

/// True if `name` is a non-empty relative path that stays below its base
pub fn is_safe_relative_path(name: &str) -> bool {
    let path = Path::new(name);
    !name.is_empty() && path.components().all(|c| matches!(c, Component::Normal(_)))
}

fn string_list(spec: &Value, pointer: &str) -> Result<Vec<String>, SpecError> {
    match spec.pointer(pointer) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| SpecError::Malformed(format!("{} must list strings", pointer)))
            })
            .collect(),
        Some(_) => Err(SpecError::Malformed(format!("{} must be a list", pointer))),
    }
}

#[cfg(test)]
#[path = "spec_tests.rs"]
mod tests;
