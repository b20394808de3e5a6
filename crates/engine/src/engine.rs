// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution engine: turns scripts and command lines into tracked child
//! processes and records their output when they end.
//!
//! Both spawn operations return as soon as the process is registered. A
//! watcher task per execution owns the child; when it exits the watcher
//! deletes any staged script, drops the registry entry, writes the log
//! record, and broadcasts [`ExecutionEvent::Finished`], in that order.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sr_core::{
    Clock, ExecutionId, ExecutionSource, ExecutionStatus, ExitOutcome, IdAllocator, LogRecord,
    SystemClock,
};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::error::EngineError;
use crate::log_store::LogStore;
use crate::registry::{ProcessHandle, ProcessRegistry, RunningIds};
use crate::script::{self, StagedFile};
use crate::spawn;

/// Capacity of the execution event channel. Slow subscribers lag rather
/// than block the watchers.
const EVENT_CAPACITY: usize = 256;

/// Default cap on captured bytes per output stream (1 MiB).
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 1024 * 1024;

/// How scripts and commands are launched.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Program that runs staged scripts (`{interpreter} {path}`)
    pub interpreter: PathBuf,
    /// Shell that runs raw command lines (`{shell} -c {command}`)
    pub shell: PathBuf,
    /// Directory uploaded scripts are staged in
    pub temp_dir: PathBuf,
    /// Accepted script file extensions, without the dot
    pub script_extensions: Vec<String>,
    /// Bytes kept per output stream; more than this kills the execution
    pub max_output_bytes: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            interpreter: PathBuf::from("node"),
            shell: PathBuf::from("/bin/sh"),
            temp_dir: std::env::temp_dir(),
            script_extensions: vec!["js".to_string(), "cjs".to_string()],
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
        }
    }
}

impl EngineConfig {
    sr_core::setters! {
        into { interpreter: PathBuf, shell: PathBuf, temp_dir: PathBuf }
        set { script_extensions: Vec<String>, max_output_bytes: usize }
    }
}

/// Lifecycle notifications for subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionEvent {
    Started { id: ExecutionId, pid: Option<u32> },
    Finished { id: ExecutionId, status: ExecutionStatus },
}

/// Spawns executions and owns the registry and log store they report to.
pub struct ExecutionEngine<C: Clock = SystemClock> {
    config: EngineConfig,
    registry: Arc<ProcessRegistry>,
    logs: Arc<LogStore>,
    ids: IdAllocator<C>,
    clock: C,
    events: broadcast::Sender<ExecutionEvent>,
    watchers: TaskTracker,
}

impl ExecutionEngine<SystemClock> {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> ExecutionEngine<C> {
    pub fn with_clock(config: EngineConfig, clock: C) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            config,
            registry: Arc::new(ProcessRegistry::new()),
            logs: Arc::new(LogStore::new()),
            ids: IdAllocator::new(clock.clone()),
            clock,
            events,
            watchers: TaskTracker::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &ProcessRegistry {
        &self.registry
    }

    pub fn logs(&self) -> &LogStore {
        &self.logs
    }

    /// Subscribe to start/finish events for executions spawned afterwards.
    pub fn subscribe(&self) -> broadcast::Receiver<ExecutionEvent> {
        self.events.subscribe()
    }

    /// Stage `bytes` as a script file and run it with the interpreter.
    pub async fn spawn_script(
        &self,
        bytes: &[u8],
        original_name: &str,
    ) -> Result<ExecutionId, EngineError> {
        let ext = script::allowed_extension(original_name, &self.config.script_extensions)?;
        let id = self.ids.next();
        let path = script::staged_path(&self.config.temp_dir, id, ext);
        let staged = script::stage(&path, bytes).await?;

        tracing::debug!(%id, path = %path.display(), bytes = bytes.len(), "staged script");
        let program = self.config.interpreter.clone().into_os_string();
        let args = vec![path.clone().into_os_string()];
        let source = ExecutionSource::Script { path, original_name: original_name.to_string() };
        self.launch(id, source, Some(staged), program, args).await
    }

    /// Run `command_line` through the shell with full shell interpretation.
    ///
    /// The command runs with the daemon's own privileges; nothing is filtered.
    pub async fn spawn_command(&self, command_line: &str) -> Result<ExecutionId, EngineError> {
        if command_line.trim().is_empty() {
            return Err(EngineError::InvalidInput("No command provided.".to_string()));
        }
        let id = self.ids.next();
        let program = self.config.shell.clone().into_os_string();
        let args = vec![OsString::from("-c"), OsString::from(command_line)];
        let source = ExecutionSource::Command { command_line: command_line.to_string() };
        self.launch(id, source, None, program, args).await
    }

    /// Forcibly stop a running execution.
    pub fn terminate(&self, id: ExecutionId) -> Result<(), EngineError> {
        self.registry.terminate(id)
    }

    pub fn running(&self) -> RunningIds {
        self.registry.list()
    }

    pub fn read_log(&self, id: ExecutionId) -> Result<LogRecord, EngineError> {
        self.logs.read(id)
    }

    /// Kill every running execution and wait until each has been cleaned
    /// up and recorded.
    pub async fn shutdown(&self) {
        let running = self.registry.drain();
        if !running.is_empty() {
            tracing::info!(count = running.len(), "terminating running executions");
        }
        for (id, handle) in running {
            tracing::debug!(%id, pid = ?handle.pid(), "killing on shutdown");
            handle.kill();
        }
        self.watchers.close();
        self.watchers.wait().await;
        self.watchers.reopen();
    }

    async fn launch(
        &self,
        id: ExecutionId,
        source: ExecutionSource,
        staged: Option<StagedFile>,
        program: OsString,
        args: Vec<OsString>,
    ) -> Result<ExecutionId, EngineError> {
        let completion = Completion {
            id,
            staged,
            registry: Arc::clone(&self.registry),
            logs: Arc::clone(&self.logs),
            events: self.events.clone(),
            clock: self.clock.clone(),
        };

        let child = match spawn::start(&program, &args) {
            Ok(child) => child,
            Err(e) => {
                tracing::warn!(
                    %id,
                    program = %Path::new(&program).display(),
                    error = %e,
                    "failed to start process"
                );
                let reason =
                    format!("failed to start {}: {e}", Path::new(&program).display());
                completion.finish(ExitOutcome::Error(reason), "", "").await;
                return Ok(id);
            }
        };

        let pid = child.id();
        let label = source.label().to_string();
        let cancel = CancellationToken::new();
        let handle = ProcessHandle::new(pid, source, self.clock.epoch_ms(), cancel.clone());
        if let Err(e) = self.registry.insert(id, handle) {
            let mut child = child;
            if let Err(kill_err) = child.start_kill() {
                tracing::warn!(%id, error = %kill_err, "failed to kill unregistered process");
            }
            // Dropping the completion removes the staged file
            return Err(e);
        }

        tracing::info!(%id, pid = ?pid, source = %label, "execution started");
        let _ = self.events.send(ExecutionEvent::Started { id, pid });

        let max_output_bytes = self.config.max_output_bytes;
        self.watchers.spawn(async move {
            let finished = spawn::watch(child, cancel, max_output_bytes).await;
            completion.finish(finished.outcome, &finished.stdout, &finished.stderr).await;
        });

        Ok(id)
    }
}

/// Everything the watcher needs to record an execution's end.
///
/// A completion dropped without finishing still removes its staged file.
struct Completion<C: Clock> {
    id: ExecutionId,
    staged: Option<StagedFile>,
    registry: Arc<ProcessRegistry>,
    logs: Arc<LogStore>,
    events: broadcast::Sender<ExecutionEvent>,
    clock: C,
}

impl<C: Clock> Completion<C> {
    async fn finish(mut self, outcome: ExitOutcome, stdout: &str, stderr: &str) {
        let id = self.id;
        if let Some(path) = self.staged.take().and_then(StagedFile::release) {
            script::remove_staged(&path).await;
        }
        // Already gone if terminate got here first
        self.registry.remove(id);

        let record = LogRecord::from_outcome(id, &outcome, stdout, stderr, self.clock.epoch_ms());
        tracing::info!(
            %id,
            status = %record.status,
            exit_code = ?record.exit_code,
            stdout_bytes = stdout.len(),
            stderr_bytes = stderr.len(),
            "execution finished"
        );
        let status = record.status.clone();
        self.logs.write(id, record);
        let _ = self.events.send(ExecutionEvent::Finished { id, status });
    }
}

#[cfg(test)]
#[path = "engine_tests/mod.rs"]
mod tests;
