// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process registry: execution id → live, killable process handle.

use std::collections::BTreeMap;

use parking_lot::Mutex;
use sr_core::{ExecutionId, ExecutionSource};
use tokio_util::sync::CancellationToken;

use crate::error::EngineError;

/// Live handle for a running execution.
///
/// Owned by the registry while the execution runs. Killing it cancels the
/// token held by the task that owns the child process; that task sends the
/// signal and reaps the child.
#[derive(Debug)]
pub struct ProcessHandle {
    pid: Option<u32>,
    source: ExecutionSource,
    started_at_ms: u64,
    cancel: CancellationToken,
}

impl ProcessHandle {
    pub fn new(
        pid: Option<u32>,
        source: ExecutionSource,
        started_at_ms: u64,
        cancel: CancellationToken,
    ) -> Self {
        Self { pid, source, started_at_ms, cancel }
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Request forced termination of the underlying process.
    pub fn kill(&self) {
        self.cancel.cancel();
    }
}

/// Display summary of one running execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningExecution {
    pub id: ExecutionId,
    pub pid: Option<u32>,
    pub label: String,
    pub started_at_ms: u64,
}

/// Point-in-time snapshot of running ids, in ascending id order.
///
/// Iterate it as often as needed; later registry changes are not reflected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunningIds(Vec<ExecutionId>);

impl RunningIds {
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, ExecutionId>> {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: ExecutionId) -> bool {
        self.0.binary_search(&id).is_ok()
    }
}

impl<'a> IntoIterator for &'a RunningIds {
    type Item = ExecutionId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, ExecutionId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for RunningIds {
    type Item = ExecutionId;
    type IntoIter = std::vec::IntoIter<ExecutionId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Registry of running executions guarded by a single lock.
#[derive(Debug, Default)]
pub struct ProcessRegistry {
    running: Mutex<BTreeMap<ExecutionId, ProcessHandle>>,
}

impl ProcessRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a newly started execution.
    pub fn insert(&self, id: ExecutionId, handle: ProcessHandle) -> Result<(), EngineError> {
        let mut running = self.running.lock();
        if running.contains_key(&id) {
            return Err(EngineError::Conflict(id));
        }
        running.insert(id, handle);
        Ok(())
    }

    /// Kill a running execution and stop tracking it.
    ///
    /// Returns without waiting for the process to exit.
    pub fn terminate(&self, id: ExecutionId) -> Result<(), EngineError> {
        let handle = self.running.lock().remove(&id).ok_or(EngineError::NotFound(id))?;
        handle.kill();
        tracing::info!(%id, pid = ?handle.pid(), "execution terminated");
        Ok(())
    }

    /// Stop tracking an execution. Absent ids are not an error.
    pub fn remove(&self, id: ExecutionId) -> Option<ProcessHandle> {
        self.running.lock().remove(&id)
    }

    /// Stop tracking every execution, handing back their handles.
    pub fn drain(&self) -> Vec<(ExecutionId, ProcessHandle)> {
        std::mem::take(&mut *self.running.lock()).into_iter().collect()
    }

    pub fn contains(&self, id: ExecutionId) -> bool {
        self.running.lock().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.running.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.running.lock().is_empty()
    }

    /// Snapshot of the ids currently running.
    pub fn list(&self) -> RunningIds {
        RunningIds(self.running.lock().keys().copied().collect())
    }

    /// Snapshot of running executions with display details.
    pub fn entries(&self) -> Vec<RunningExecution> {
        self.running
            .lock()
            .iter()
            .map(|(id, handle)| RunningExecution {
                id: *id,
                pid: handle.pid,
                label: handle.source.label().to_string(),
                started_at_ms: handle.started_at_ms,
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
