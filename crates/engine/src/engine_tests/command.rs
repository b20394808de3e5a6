// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for raw shell command executions.

use super::*;
use std::collections::HashSet;
use tokio::task::JoinSet;

#[tokio::test]
async fn exit_one_logs_nonzero_error_and_no_stdout() {
    let (engine, _dir) = engine();
    let id = engine.spawn_command("exit 1").await.unwrap();

    let record = wait_for_log(&engine, id).await;

    let error = record.error().unwrap();
    assert!(!error.is_empty());
    assert!(error.contains("non-zero"), "{error}");
    assert_eq!(record.stdout(), None);
    assert_eq!(record.exit_code, Some(1));
    assert!(matches!(record.status, ExecutionStatus::Failed(_)));
}

#[tokio::test]
async fn shell_features_are_interpreted() {
    let (engine, _dir) = engine();
    let id = engine
        .spawn_command("FOO=bar; echo \"$FOO\" | tr a-z A-Z && echo done")
        .await
        .unwrap();

    let record = wait_for_log(&engine, id).await;

    assert_eq!(record.stdout(), Some("BAR\ndone\n"));
    assert_eq!(record.status, ExecutionStatus::Completed);
}

#[yare::parameterized(
    empty      = { "" },
    spaces     = { "   " },
    whitespace = { "\n\t " },
)]
fn blank_command_is_rejected(command: &str) {
    tokio::runtime::Runtime::new().unwrap().block_on(async {
        let (engine, _dir) = engine();
        let err = engine.spawn_command(command).await.unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
        assert!(engine.registry().is_empty());
        assert!(engine.logs().is_empty());
    });
}

#[tokio::test]
async fn unknown_program_fails_in_the_log() {
    let (engine, _dir) = engine();
    let id = engine.spawn_command("definitely-not-a-real-program-xyz").await.unwrap();

    let record = wait_for_log(&engine, id).await;

    assert!(record.has_error());
    // sh reports 127 and explains on stderr
    assert_eq!(record.exit_code, Some(127));
    assert!(record.stderr().is_some());
}

#[tokio::test]
async fn completed_execution_leaves_registry() {
    let (engine, _dir) = engine();
    let id = engine.spawn_command("echo done").await.unwrap();

    let record = wait_for_log(&engine, id).await;

    assert_eq!(record.id, id);
    assert!(!engine.registry().contains(id));
    assert!(!engine.running().contains(id));
    assert_eq!(engine.logs().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn hundred_concurrent_commands_stay_isolated() {
    let (engine, _dir) = engine();

    let mut set = JoinSet::new();
    for n in 0..100 {
        let engine = Arc::clone(&engine);
        set.spawn(async move {
            let id = engine.spawn_command(&format!("echo out-{n}; echo err-{n} >&2")).await.unwrap();
            (n, id)
        });
    }

    let mut spawned = Vec::new();
    while let Some(joined) = set.join_next().await {
        spawned.push(joined.unwrap());
    }

    let ids: HashSet<ExecutionId> = spawned.iter().map(|(_, id)| *id).collect();
    assert_eq!(ids.len(), 100);

    for (n, id) in spawned {
        let record = wait_for_log(&engine, id).await;
        assert_eq!(record.stdout(), Some(format!("out-{n}\n").as_str()));
        assert_eq!(record.stderr(), Some(format!("err-{n}\n").as_str()));
    }
    assert_eq!(engine.logs().len(), 100);
    assert!(engine.registry().is_empty());
}

#[tokio::test]
async fn runaway_output_fails_at_limit() {
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfig::default().temp_dir(dir.path()).max_output_bytes(8 * 1024);
    let engine = ExecutionEngine::new(config);

    let id = engine.spawn_command("head -c 200000000 /dev/zero").await.unwrap();
    let record = wait_for_log(&engine, id).await;

    assert_eq!(record.error(), Some("stdout maxBuffer length exceeded"));
    assert_eq!(record.stdout().map(str::len), Some(8 * 1024));
    assert!(!engine.registry().contains(id));
}

#[test]
fn default_output_limit_is_one_mebibyte() {
    assert_eq!(EngineConfig::default().max_output_bytes, DEFAULT_MAX_OUTPUT_BYTES);
    assert_eq!(DEFAULT_MAX_OUTPUT_BYTES, 1024 * 1024);
}
