// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the execution engine against real child processes.
//!
//! Scripts are run with `/bin/sh` as the interpreter so the tests do not
//! depend on Node being installed.

use super::*;
use std::time::Duration;
use tempfile::TempDir;

mod command;
mod events;
mod script;
mod shutdown;
mod terminate;

/// Engine whose scripts are interpreted by `/bin/sh`, staged in a fresh
/// temp dir that lives as long as the returned guard.
pub(crate) fn engine() -> (Arc<ExecutionEngine>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfig::default().interpreter("/bin/sh").temp_dir(dir.path());
    (Arc::new(ExecutionEngine::new(config)), dir)
}

/// Poll until a log record for `id` exists.
pub(crate) async fn wait_for_log<C: Clock>(engine: &ExecutionEngine<C>, id: ExecutionId) -> LogRecord {
    tokio::time::timeout(Duration::from_secs(10), async {
        loop {
            if let Ok(record) = engine.read_log(id) {
                return record;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap_or_else(|_| panic!("no log record for {id}"))
}

/// Poll until `path` exists.
pub(crate) async fn wait_for_file(path: &Path) {
    tokio::time::timeout(Duration::from_secs(10), async {
        while !path.exists() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap_or_else(|_| panic!("{} never appeared", path.display()))
}

/// Files currently staged in the engine's temp dir.
pub(crate) fn staged_files(dir: &TempDir) -> Vec<PathBuf> {
    std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect()
}
