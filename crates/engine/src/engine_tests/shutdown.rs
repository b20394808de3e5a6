// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for shutting the engine down with executions still running.

use super::*;
use crate::test_support::{read_pid, wait_until_dead};

/// Script that backgrounds a sleeper, reports its pid, and waits on it.
fn sleeper_script(pid_file: &Path) -> String {
    format!("sleep 30 & echo $! > {}; wait", pid_file.display())
}

#[tokio::test]
async fn shutdown_kills_running_and_cleans_up() {
    let (engine, dir) = engine();
    let marks = tempfile::tempdir().unwrap();
    let pid_file = marks.path().join("bg");
    let id = engine.spawn_script(sleeper_script(&pid_file).as_bytes(), "long.js").await.unwrap();
    let pid = read_pid(&pid_file).await;

    tokio::time::timeout(Duration::from_secs(10), engine.shutdown()).await.unwrap();

    assert!(engine.registry().is_empty());
    assert!(staged_files(&dir).is_empty());
    let record = engine.read_log(id).unwrap();
    assert!(record.error().unwrap().contains("terminated"));
    wait_until_dead(pid).await;
}

#[tokio::test]
async fn shutdown_waits_for_every_execution() {
    let (engine, _dir) = engine();
    let mut ids = Vec::new();
    for _ in 0..5 {
        ids.push(engine.spawn_command("sleep 30").await.unwrap());
    }

    engine.shutdown().await;

    for id in ids {
        assert!(engine.read_log(id).is_ok(), "no record for {id}");
    }
}

#[tokio::test]
async fn shutdown_with_nothing_running_returns() {
    let (engine, _dir) = engine();
    tokio::time::timeout(Duration::from_secs(1), engine.shutdown()).await.unwrap();

    // Still usable afterwards
    let id = engine.spawn_command("echo after").await.unwrap();
    assert_eq!(wait_for_log(&engine, id).await.stdout(), Some("after\n"));
}

#[test]
fn dropped_runtime_kills_children_and_removes_script() {
    let (engine, dir) = engine();
    let marks = tempfile::tempdir().unwrap();
    let pid_file = marks.path().join("bg");
    let script = sleeper_script(&pid_file);

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let pid = runtime.block_on(async {
        engine.spawn_script(script.as_bytes(), "long.js").await.unwrap();
        read_pid(&pid_file).await
    });
    drop(runtime);

    assert!(staged_files(&dir).is_empty());
    tokio::runtime::Runtime::new().unwrap().block_on(wait_until_dead(pid));
}
