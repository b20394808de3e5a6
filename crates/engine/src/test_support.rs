// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Helpers for tests that watch real processes.

use std::path::Path;
use std::time::Duration;

/// Poll until `path` holds a pid written by a test script.
pub(crate) async fn read_pid(path: &Path) -> i32 {
    tokio::time::timeout(Duration::from_secs(10), async {
        loop {
            if let Some(pid) = std::fs::read_to_string(path).ok().and_then(|s| s.trim().parse().ok())
            {
                return pid;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap_or_else(|_| panic!("no pid in {}", path.display()))
}

/// Poll until `pid` is gone or a zombie.
pub(crate) async fn wait_until_dead(pid: i32) {
    tokio::time::timeout(Duration::from_secs(10), async {
        while process_alive(pid) {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap_or_else(|_| panic!("process {pid} survived"));
}

/// Alive and not a zombie, per `/proc/{pid}/stat`.
pub(crate) fn process_alive(pid: i32) -> bool {
    let Ok(stat) = std::fs::read_to_string(format!("/proc/{pid}/stat")) else {
        return false;
    };
    let state = stat.rsplit_once(')').and_then(|(_, rest)| rest.trim_start().chars().next());
    !matches!(state, Some('Z') | Some('X') | None)
}
