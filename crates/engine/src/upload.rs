// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Expansion of upload sources into individual files

use crate::EngineError;
use rr_core::UploadFile;
use std::path::Path;

/// Expand directory sources into one entry per leaf file
///
/// Files below a directory keep their relative structure beneath the
/// directory's target. Entries within a directory are visited in name order.
/// Symlinks to files are uploaded as files; symlinks to directories are
/// not followed.
pub(crate) fn expand_uploads(uploads: &[UploadFile]) -> Result<Vec<UploadFile>, EngineError> {
    let mut files = Vec::new();
    for upload in uploads {
        let metadata = std::fs::metadata(&upload.source).map_err(|source| EngineError::Input {
            path: upload.source.clone(),
            source,
        })?;
        if metadata.is_dir() {
            walk(&upload.source, &upload.target, &mut files)?;
        } else {
            files.push(upload.clone());
        }
    }
    Ok(files)
}

fn walk(dir: &Path, target: &str, files: &mut Vec<UploadFile>) -> Result<(), EngineError> {
    let input_error = |source| EngineError::Input {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = std::fs::read_dir(dir)
        .map_err(input_error)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(input_error)?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();
        let child_target = format!("{}/{}", target.trim_end_matches('/'), name);
        let file_type = entry.file_type().map_err(input_error)?;
        if file_type.is_dir() {
            walk(&path, &child_target, files)?;
        } else if file_type.is_symlink() && path.is_dir() {
            tracing::warn!(path = %path.display(), "skipping symlinked directory");
        } else {
            files.push(UploadFile::new(path, child_target));
        }
    }
    Ok(())
}
