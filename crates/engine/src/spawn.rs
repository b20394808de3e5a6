// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Child process creation and the watcher that observes its exit.

use std::ffi::OsStr;
use std::os::unix::process::ExitStatusExt;
use std::process::{ExitStatus, Stdio};

use nix::sys::signal::{killpg, Signal};
use nix::unistd::Pid;
use sr_core::ExitOutcome;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Output of a finished child process.
#[derive(Debug)]
pub(crate) struct Finished {
    pub outcome: ExitOutcome,
    pub stdout: String,
    pub stderr: String,
}

/// Start `program` with `args` in its own process group, stdout and
/// stderr piped, stdin closed.
pub(crate) fn start<I, S>(program: &OsStr, args: I) -> std::io::Result<Child>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .process_group(0)
        .spawn()
}

/// Wait for `child` to exit while draining its output.
///
/// When `cancel` fires the whole process group is killed and the child is
/// still reaped, so output written before the kill is kept. Each stream is
/// captured up to `max_output_bytes`; going past that kills the group and
/// fails the execution with the truncated output kept.
pub(crate) async fn watch(
    mut child: Child,
    cancel: CancellationToken,
    max_output_bytes: usize,
) -> Finished {
    let pid = child.id();
    let mut guard = GroupGuard { pid };
    let overflow = CancellationToken::new();
    let stdout =
        child.stdout.take().map(|s| tokio::spawn(drain(s, max_output_bytes, overflow.clone())));
    let stderr =
        child.stderr.take().map(|s| tokio::spawn(drain(s, max_output_bytes, overflow.clone())));

    let (outcome, group_killed) = tokio::select! {
        status = child.wait() => match status {
            Ok(status) => (outcome_of(status), false),
            Err(e) => (ExitOutcome::Error(format!("failed to wait on process: {e}")), false),
        },
        _ = cancel.cancelled() => (reap_killed(&mut child, pid, ExitOutcome::Terminated).await, true),
        _ = overflow.cancelled() => {
            let killed = ExitOutcome::Signaled(Signal::SIGKILL as i32);
            (reap_killed(&mut child, pid, killed).await, true)
        }
    };

    // Background children can hold the pipes open after the leader exits.
    // A terminate request or an overflow during this phase kills what is
    // left of the group.
    let draining = async { (collect(stdout).await, collect(stderr).await) };
    tokio::pin!(draining);
    let (stdout, stderr) = tokio::select! {
        out = &mut draining => out,
        _ = cancel.cancelled(), if !group_killed => {
            signal_group(pid);
            draining.await
        }
        _ = overflow.cancelled(), if !group_killed => {
            signal_group(pid);
            draining.await
        }
    };
    guard.disarm();

    let outcome = if outcome == ExitOutcome::Terminated {
        outcome
    } else if stdout.truncated {
        ExitOutcome::Error("stdout maxBuffer length exceeded".to_string())
    } else if stderr.truncated {
        ExitOutcome::Error("stderr maxBuffer length exceeded".to_string())
    } else {
        outcome
    };
    Finished { outcome, stdout: stdout.text, stderr: stderr.text }
}

/// Kills the process group if the watcher is dropped before it finishes,
/// as happens when the runtime shuts down under it.
struct GroupGuard {
    pid: Option<u32>,
}

impl GroupGuard {
    fn disarm(&mut self) {
        self.pid = None;
    }
}

impl Drop for GroupGuard {
    fn drop(&mut self) {
        if self.pid.is_some() && signal_group(self.pid) {
            tracing::info!(pid = ?self.pid, "killed process group of abandoned execution");
        }
    }
}

fn outcome_of(status: ExitStatus) -> ExitOutcome {
    match (status.code(), status.signal()) {
        (Some(code), _) => ExitOutcome::Exited(code),
        (None, Some(signal)) => ExitOutcome::Signaled(signal),
        (None, None) => ExitOutcome::Error(format!("process ended with {status}")),
    }
}

async fn reap_killed(child: &mut Child, pid: Option<u32>, killed: ExitOutcome) -> ExitOutcome {
    kill_group(child, pid);
    match child.wait().await {
        Ok(_) => killed,
        Err(e) => ExitOutcome::Error(format!("failed to reap killed process: {e}")),
    }
}

fn kill_group(child: &mut Child, pid: Option<u32>) {
    if !signal_group(pid) {
        if let Err(e) = child.start_kill() {
            tracing::warn!(pid = ?pid, error = %e, "failed to kill process");
        }
    }
}

/// SIGKILL the process group led by `pid`. Returns false if no signal was sent.
fn signal_group(pid: Option<u32>) -> bool {
    let Some(raw) = pid.and_then(|p| i32::try_from(p).ok()) else {
        return false;
    };
    match killpg(Pid::from_raw(raw), Signal::SIGKILL) {
        Ok(()) => true,
        Err(nix::errno::Errno::ESRCH) => false,
        Err(e) => {
            tracing::warn!(pid = raw, error = %e, "failed to signal process group");
            false
        }
    }
}

/// Bytes read from one output stream.
struct Captured {
    bytes: Vec<u8>,
    truncated: bool,
}

/// Text of one output stream.
struct Output {
    text: String,
    truncated: bool,
}

/// Read up to `limit` bytes. One byte more means the stream overflowed:
/// the capture is cut at `limit` and `overflow` is cancelled.
async fn drain<R: AsyncRead + Unpin>(
    reader: R,
    limit: usize,
    overflow: CancellationToken,
) -> Captured {
    let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
    let mut bytes = Vec::new();
    if let Err(e) = reader.take(cap).read_to_end(&mut bytes).await {
        tracing::warn!(error = %e, "failed to read process output");
    }
    let truncated = bytes.len() > limit;
    if truncated {
        bytes.truncate(limit);
        overflow.cancel();
    }
    Captured { bytes, truncated }
}

async fn collect(task: Option<JoinHandle<Captured>>) -> Output {
    match task {
        Some(task) => match task.await {
            Ok(captured) => Output {
                text: String::from_utf8_lossy(&captured.bytes).into_owned(),
                truncated: captured.truncated,
            },
            Err(e) => {
                tracing::warn!(error = %e, "output reader task failed");
                Output { text: String::new(), truncated: false }
            }
        },
        None => Output { text: String::new(), truncated: false },
    }
}

#[cfg(test)]
#[path = "spawn_tests.rs"]
mod tests;
