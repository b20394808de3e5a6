// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Captured output of a finished execution.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::execution::ExecutionStatus;
use crate::id::ExecutionId;

/// How a child process ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitOutcome {
    /// Exited on its own with this code
    Exited(i32),
    /// Ended by a signal nobody here sent
    Signaled(i32),
    /// Killed through an explicit terminate request
    Terminated,
    /// Never started, or could not be waited on
    Error(String),
}

impl ExitOutcome {
    /// Terminal status this outcome maps to.
    pub fn status(&self) -> ExecutionStatus {
        match self {
            ExitOutcome::Exited(0) => ExecutionStatus::Completed,
            ExitOutcome::Exited(code) => {
                ExecutionStatus::Failed(format!("process exited with non-zero status {code}"))
            }
            ExitOutcome::Signaled(signal) => {
                ExecutionStatus::Failed(format!("process terminated by signal {signal}"))
            }
            ExitOutcome::Terminated => {
                ExecutionStatus::Failed("process terminated by request (SIGKILL)".to_string())
            }
            ExitOutcome::Error(message) => ExecutionStatus::Failed(message.clone()),
        }
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ExitOutcome::Exited(code) => Some(*code),
            _ => None,
        }
    }
}

/// One tagged chunk of captured output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stream", content = "text", rename_all = "snake_case")]
pub enum LogLine {
    Error(String),
    Stderr(String),
    Stdout(String),
}

/// Captured output for one execution. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub id: ExecutionId,
    pub status: ExecutionStatus,
    pub exit_code: Option<i32>,
    pub lines: Vec<LogLine>,
    pub finished_at_ms: u64,
}

impl LogRecord {
    /// Build a record from a process outcome and its captured streams.
    ///
    /// Lines are ordered error, stderr, stdout; empty streams are omitted.
    pub fn from_outcome(
        id: ExecutionId,
        outcome: &ExitOutcome,
        stdout: &str,
        stderr: &str,
        finished_at_ms: u64,
    ) -> Self {
        let status = outcome.status();
        let mut lines = Vec::with_capacity(3);
        if let Some(reason) = status.failure_reason() {
            lines.push(LogLine::Error(reason.to_string()));
        }
        if !stderr.is_empty() {
            lines.push(LogLine::Stderr(stderr.to_string()));
        }
        if !stdout.is_empty() {
            lines.push(LogLine::Stdout(stdout.to_string()));
        }
        Self { id, status, exit_code: outcome.exit_code(), lines, finished_at_ms }
    }

    pub fn has_error(&self) -> bool {
        self.lines.iter().any(|l| matches!(l, LogLine::Error(_)))
    }

    pub fn error(&self) -> Option<&str> {
        self.lines.iter().find_map(|l| match l {
            LogLine::Error(s) => Some(s.as_str()),
            _ => None,
        })
    }

    pub fn stdout(&self) -> Option<&str> {
        self.lines.iter().find_map(|l| match l {
            LogLine::Stdout(s) => Some(s.as_str()),
            _ => None,
        })
    }

    pub fn stderr(&self) -> Option<&str> {
        self.lines.iter().find_map(|l| match l {
            LogLine::Stderr(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Plain-text rendering shown on the output pages.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            // Writing into a String cannot fail
            let _ = match line {
                LogLine::Error(msg) => writeln!(out, "Error executing script {}: {}", self.id, msg),
                LogLine::Stderr(text) => writeln!(out, "stderr from script {}: {}", self.id, text),
                LogLine::Stdout(text) => writeln!(out, "stdout from script {}: {}", self.id, text),
            };
        }
        out
    }
}

#[cfg(test)]
#[path = "log_record_tests.rs"]
mod tests;
