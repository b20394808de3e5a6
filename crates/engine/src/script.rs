// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Staging of uploaded scripts as temporary files.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use sr_core::ExecutionId;
use tokio::io::AsyncWriteExt;

use crate::error::EngineError;

/// Return the extension of `original_name` if it is in `allowed`.
///
/// Matching is case-sensitive and ignores any leading dot in `allowed`.
pub(crate) fn allowed_extension<'a>(
    original_name: &'a str,
    allowed: &[String],
) -> Result<&'a str, EngineError> {
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|ext| allowed.iter().any(|a| a.trim_start_matches('.') == *ext));
    ext.ok_or_else(|| {
        let list: Vec<String> =
            allowed.iter().map(|a| format!(".{}", a.trim_start_matches('.'))).collect();
        EngineError::InvalidInput(format!("Only {} files are allowed.", list.join(" or ")))
    })
}

/// Path a script for `id` is staged at.
pub(crate) fn staged_path(temp_dir: &Path, id: ExecutionId, ext: &str) -> PathBuf {
    temp_dir.join(format!("script-{id}.{ext}"))
}

/// A staged script file, deleted synchronously when dropped unless
/// released first.
#[derive(Debug)]
pub(crate) struct StagedFile {
    path: Option<PathBuf>,
}

impl StagedFile {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    pub(crate) fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Give up ownership; the file is no longer removed on drop.
    pub(crate) fn release(mut self) -> Option<PathBuf> {
        self.path.take()
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        let Some(path) = self.path.take() else {
            return;
        };
        match std::fs::remove_file(&path) {
            Ok(()) => tracing::debug!(path = %path.display(), "removed abandoned staged script"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to remove staged script")
            }
        }
    }
}

/// Write script bytes to a fresh file. Never overwrites an existing file.
///
/// A partially written file is removed before the error is returned.
pub(crate) async fn stage(path: &Path, bytes: &[u8]) -> Result<StagedFile, EngineError> {
    let context = || format!("failed to stage script at {}", path.display());
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
        .map_err(|e| EngineError::io(context(), e))?;
    let staged = StagedFile::new(path.to_path_buf());
    file.write_all(bytes).await.map_err(|e| EngineError::io(context(), e))?;
    file.flush().await.map_err(|e| EngineError::io(context(), e))?;
    Ok(staged)
}

/// Delete a staged script. A file that is already gone is fine.
pub(crate) async fn remove_staged(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::debug!(path = %path.display(), "removed staged script"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove staged script")
        }
    }
}

#[cfg(test)]
#[path = "script_tests.rs"]
mod tests;
