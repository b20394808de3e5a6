// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for uploaded script executions.

use super::*;

#[tokio::test]
async fn hello_script_logs_stdout_without_error() {
    let (engine, _dir) = engine();
    let id = engine.spawn_script(b"echo hello", "hello.js").await.unwrap();

    let record = wait_for_log(&engine, id).await;

    assert_eq!(record.status, ExecutionStatus::Completed);
    assert!(!record.has_error());
    assert!(record.stdout().unwrap().contains("hello"));
    assert!(!engine.registry().contains(id));
}

#[tokio::test]
async fn script_is_registered_before_it_finishes() {
    let (engine, dir) = engine();
    let marker = dir.path().join("go");
    let body = format!("while [ ! -e {} ]; do sleep 0.01; done", marker.display());

    let id = engine.spawn_script(body.as_bytes(), "wait.cjs").await.unwrap();

    assert!(engine.registry().contains(id));
    assert!(engine.running().contains(id));
    assert!(engine.read_log(id).is_err());

    std::fs::write(&marker, b"").unwrap();
    let record = wait_for_log(&engine, id).await;
    assert_eq!(record.status, ExecutionStatus::Completed);
}

#[tokio::test]
async fn staged_file_is_removed_after_completion() {
    let (engine, dir) = engine();
    let id = engine.spawn_script(b"exit 0", "a.js").await.unwrap();
    let staged = dir.path().join(format!("script-{id}.js"));

    wait_for_log(&engine, id).await;

    assert!(!staged.exists());
    assert!(staged_files(&dir).is_empty());
}

#[tokio::test]
async fn cjs_extension_is_kept_on_staged_file() {
    let (engine, dir) = engine();
    let marker = dir.path().join("release");
    let body = format!("while [ ! -e {} ]; do sleep 0.01; done", marker.display());

    let id = engine.spawn_script(body.as_bytes(), "module.cjs").await.unwrap();

    assert!(dir.path().join(format!("script-{id}.cjs")).exists());
    std::fs::write(&marker, b"").unwrap();
    wait_for_log(&engine, id).await;
}

#[yare::parameterized(
    python   = { "evil.py" },
    mjs      = { "module.mjs" },
    no_ext   = { "script" },
    empty    = { "" },
)]
fn disallowed_extension_spawns_nothing(name: &str) {
    tokio::runtime::Runtime::new().unwrap().block_on(async {
        let (engine, dir) = engine();
        let err = engine.spawn_script(b"echo nope", name).await.unwrap_err();

        assert!(matches!(err, EngineError::InvalidInput(_)));
        assert!(engine.registry().is_empty());
        assert!(engine.logs().is_empty());
        assert!(staged_files(&dir).is_empty());
    });
}

#[tokio::test]
async fn failing_script_logs_stderr_and_error() {
    let (engine, _dir) = engine();
    let id = engine.spawn_script(b"echo broken >&2; exit 2", "bad.js").await.unwrap();

    let record = wait_for_log(&engine, id).await;

    assert!(record.has_error());
    assert_eq!(record.stderr(), Some("broken\n"));
    assert_eq!(record.exit_code, Some(2));
}

#[tokio::test]
async fn missing_interpreter_is_logged_not_returned() {
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfig::default()
        .interpreter("/nonexistent/interpreter")
        .temp_dir(dir.path());
    let engine = ExecutionEngine::new(config);

    let id = engine.spawn_script(b"echo hi", "hi.js").await.unwrap();

    // Recorded synchronously, nothing left to wait for
    let record = engine.read_log(id).unwrap();
    assert!(record.error().unwrap().contains("failed to start"));
    assert!(!engine.registry().contains(id));
    assert!(staged_files(&dir).is_empty());
}

#[tokio::test]
async fn distinct_ids_for_back_to_back_uploads() {
    let (engine, _dir) = engine();
    let first = engine.spawn_script(b"true", "a.js").await.unwrap();
    let second = engine.spawn_script(b"true", "b.js").await.unwrap();
    assert_ne!(first, second);
    wait_for_log(&engine, first).await;
    wait_for_log(&engine, second).await;
}
