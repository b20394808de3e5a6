// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sr-engine: process lifecycle and log registry
//!
//! [`ExecutionEngine`] spawns scripts and shell commands as child processes,
//! tracks them in a [`ProcessRegistry`] while they run, and stores their
//! captured output in a [`LogStore`] once they end.

mod engine;
mod error;
mod log_store;
mod registry;
mod script;
mod spawn;

#[cfg(test)]
mod test_support;

pub use engine::{EngineConfig, ExecutionEngine, ExecutionEvent, DEFAULT_MAX_OUTPUT_BYTES};
pub use error::EngineError;
pub use log_store::LogStore;
pub use registry::{ProcessHandle, ProcessRegistry, RunningExecution, RunningIds};
