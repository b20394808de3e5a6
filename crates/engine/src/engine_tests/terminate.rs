// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for forced termination and its race with natural completion.

use super::*;

#[tokio::test]
async fn terminate_removes_from_list_immediately() {
    let (engine, _dir) = engine();
    let id = engine.spawn_command("sleep 30").await.unwrap();
    assert!(engine.running().contains(id));

    engine.terminate(id).unwrap();

    assert!(!engine.running().contains(id));
    assert!(!engine.registry().contains(id));
}

#[tokio::test]
async fn terminated_execution_is_recorded_as_failed() {
    let (engine, _dir) = engine();
    let id = engine.spawn_command("sleep 30").await.unwrap();

    engine.terminate(id).unwrap();
    let record = wait_for_log(&engine, id).await;

    assert!(record.error().unwrap().contains("terminated"));
    assert_eq!(record.stdout(), None);
    assert_eq!(record.exit_code, None);
}

#[tokio::test]
async fn output_before_kill_is_kept_not_invented() {
    let (engine, dir) = engine();
    let marker = dir.path().join("printed");
    let command = format!("echo partial; touch {}; sleep 30; echo never", marker.display());
    let id = engine.spawn_command(&command).await.unwrap();

    wait_for_file(&marker).await;
    engine.terminate(id).unwrap();
    let record = wait_for_log(&engine, id).await;

    assert_eq!(record.stdout(), Some("partial\n"));
}

#[tokio::test]
async fn terminate_unknown_id_is_not_found() {
    let (engine, _dir) = engine();
    let running = engine.spawn_command("sleep 30").await.unwrap();
    let unknown = ExecutionId::new(running.get() + 1_000);

    let err = engine.terminate(unknown).unwrap_err();

    assert!(matches!(err, EngineError::NotFound(id) if id == unknown));
    assert_eq!(engine.running().iter().collect::<Vec<_>>(), vec![running]);
    engine.terminate(running).unwrap();
}

#[tokio::test]
async fn terminate_twice_reports_not_found_second_time() {
    let (engine, _dir) = engine();
    let id = engine.spawn_command("sleep 30").await.unwrap();

    engine.terminate(id).unwrap();
    assert!(matches!(engine.terminate(id), Err(EngineError::NotFound(_))));
}

#[tokio::test]
async fn terminated_script_file_is_removed() {
    let (engine, dir) = engine();
    let id = engine.spawn_script(b"sleep 30", "long.js").await.unwrap();
    let staged = dir.path().join(format!("script-{id}.js"));
    assert!(staged.exists());

    engine.terminate(id).unwrap();
    wait_for_log(&engine, id).await;

    assert!(!staged.exists());
}

#[tokio::test]
async fn terminate_racing_natural_exit_never_errors() {
    let (engine, _dir) = engine();
    for _ in 0..20 {
        let id = engine.spawn_command("true").await.unwrap();
        // Either we win (Ok) or completion already removed it (NotFound)
        match engine.terminate(id) {
            Ok(()) | Err(EngineError::NotFound(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
        let record = wait_for_log(&engine, id).await;
        assert!(record.status.is_terminal());
        assert!(!engine.registry().contains(id));
    }
}
