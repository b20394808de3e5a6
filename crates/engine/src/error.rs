// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine error types.

use sr_core::ExecutionId;

/// Errors surfaced by engine, registry, and log store operations.
///
/// A process that fails to start is not an error here: that failure is
/// recorded in the execution's log record instead.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Bad or missing upload, disallowed extension, empty command.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No execution with this id is known to the queried structure.
    #[error("execution not found: {0}")]
    NotFound(ExecutionId),

    /// An execution with this id is already registered.
    #[error("execution already registered: {0}")]
    Conflict(ExecutionId),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl EngineError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        EngineError::Io { context: context.into(), source }
    }
}
