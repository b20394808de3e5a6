// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for execution lifecycle events and clock-driven ids.

use super::*;
use sr_core::FakeClock;

async fn next_event(rx: &mut broadcast::Receiver<ExecutionEvent>) -> ExecutionEvent {
    tokio::time::timeout(Duration::from_secs(10), rx.recv()).await.unwrap().unwrap()
}

#[tokio::test]
async fn started_then_finished() {
    let (engine, _dir) = engine();
    let mut rx = engine.subscribe();

    let id = engine.spawn_command("echo hi").await.unwrap();

    assert!(matches!(next_event(&mut rx).await, ExecutionEvent::Started { id: got, pid: Some(_) } if got == id));
    assert_eq!(
        next_event(&mut rx).await,
        ExecutionEvent::Finished { id, status: ExecutionStatus::Completed }
    );
    // The log is in place by the time Finished is observed
    assert!(engine.read_log(id).is_ok());
    assert!(!engine.registry().contains(id));
}

#[tokio::test]
async fn spawn_failure_finishes_without_starting() {
    let config = EngineConfig::default().shell("/nonexistent/shell");
    let engine = ExecutionEngine::new(config);
    let mut rx = engine.subscribe();

    let id = engine.spawn_command("echo hi").await.unwrap();

    match next_event(&mut rx).await {
        ExecutionEvent::Finished { id: got, status: ExecutionStatus::Failed(reason) } => {
            assert_eq!(got, id);
            assert!(reason.contains("failed to start"), "{reason}");
        }
        other => panic!("expected Finished, got {other:?}"),
    }
}

#[tokio::test]
async fn ids_follow_the_clock_and_never_collide() {
    let clock = FakeClock::at(1_700_000_000_000);
    let engine = ExecutionEngine::with_clock(EngineConfig::default(), clock.clone());

    let a = engine.spawn_command("true").await.unwrap();
    let b = engine.spawn_command("true").await.unwrap();
    clock.advance(Duration::from_secs(1));
    let c = engine.spawn_command("true").await.unwrap();

    assert_eq!(a.get(), 1_700_000_000_000);
    assert_eq!(b.get(), 1_700_000_000_001);
    assert_eq!(c.get(), 1_700_000_001_000);

    for id in [a, b, c] {
        let record = wait_for_log(&engine, id).await;
        assert!(record.finished_at_ms >= 1_700_000_000_000);
    }
}
