// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution source and lifecycle status.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What an execution runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExecutionSource {
    /// An uploaded script staged at `path`, run by the script interpreter.
    Script { path: PathBuf, original_name: String },
    /// A raw command line handed to the shell as-is.
    Command { command_line: String },
}

impl ExecutionSource {
    /// Short human-readable label: the upload name or the command line.
    pub fn label(&self) -> &str {
        match self {
            ExecutionSource::Script { original_name, .. } => original_name,
            ExecutionSource::Command { command_line } => command_line,
        }
    }
}

/// Status of an execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum ExecutionStatus {
    /// Process is alive and tracked in the registry
    Running,
    /// Process exited with status 0
    Completed,
    /// Process failed to start, exited non-zero, or was killed
    Failed(String),
}

impl ExecutionStatus {
    /// Whether this status is terminal (no further transitions expected)
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ExecutionStatus::Running)
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            ExecutionStatus::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

crate::simple_display! {
    ExecutionStatus {
        Running => "running",
        Completed => "completed",
        Failed(..) => "failed",
    }
}

#[cfg(test)]
#[path = "execution_tests.rs"]
mod tests;
