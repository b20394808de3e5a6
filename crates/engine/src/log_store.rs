// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory store of captured output, keyed by execution id.

use std::collections::HashMap;

use parking_lot::Mutex;
use sr_core::{ExecutionId, LogRecord};

use crate::error::EngineError;

#[derive(Debug, Default)]
struct Logs {
    /// First-write order of ids; rewrites keep their slot.
    order: Vec<ExecutionId>,
    records: HashMap<ExecutionId, LogRecord>,
}

/// Log records in insertion order, behind a single lock.
#[derive(Debug, Default)]
pub struct LogStore {
    inner: Mutex<Logs>,
}

impl LogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the record for `id`, replacing any earlier one.
    pub fn write(&self, id: ExecutionId, record: LogRecord) {
        let mut logs = self.inner.lock();
        if logs.records.insert(id, record).is_none() {
            logs.order.push(id);
        }
    }

    pub fn read(&self, id: ExecutionId) -> Result<LogRecord, EngineError> {
        self.inner.lock().records.get(&id).cloned().ok_or(EngineError::NotFound(id))
    }

    /// Every stored record, oldest first.
    pub fn read_all(&self) -> Vec<(ExecutionId, LogRecord)> {
        let logs = self.inner.lock();
        logs.order
            .iter()
            .filter_map(|id| logs.records.get(id).map(|r| (*id, r.clone())))
            .collect()
    }

    pub fn contains(&self, id: ExecutionId) -> bool {
        self.inner.lock().records.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().records.is_empty()
    }
}

#[cfg(test)]
#[path = "log_store_tests.rs"]
mod tests;
