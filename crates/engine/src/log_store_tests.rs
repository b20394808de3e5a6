// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use sr_core::ExitOutcome;

fn record(raw: u64, stdout: &str) -> LogRecord {
    LogRecord::from_outcome(ExecutionId::new(raw), &ExitOutcome::Exited(0), stdout, "", raw)
}

#[test]
fn read_missing_is_not_found() {
    let store = LogStore::new();
    let err = store.read(ExecutionId::new(9)).unwrap_err();
    assert!(matches!(err, EngineError::NotFound(id) if id.get() == 9));
}

#[test]
fn write_then_read() {
    let store = LogStore::new();
    store.write(ExecutionId::new(1), record(1, "hello\n"));
    let read = store.read(ExecutionId::new(1)).unwrap();
    assert_eq!(read.stdout(), Some("hello\n"));
    assert!(store.contains(ExecutionId::new(1)));
}

#[test]
fn read_all_keeps_insertion_order() {
    let store = LogStore::new();
    for raw in [30, 10, 20] {
        store.write(ExecutionId::new(raw), record(raw, "x"));
    }
    let ids: Vec<u64> = store.read_all().into_iter().map(|(id, _)| id.get()).collect();
    assert_eq!(ids, vec![30, 10, 20]);
}

#[test]
fn rewrite_replaces_record_in_place() {
    let store = LogStore::new();
    store.write(ExecutionId::new(1), record(1, "first"));
    store.write(ExecutionId::new(2), record(2, "other"));
    store.write(ExecutionId::new(1), record(1, "second"));

    assert_eq!(store.len(), 2);
    let all = store.read_all();
    assert_eq!(all[0].0, ExecutionId::new(1));
    assert_eq!(all[0].1.stdout(), Some("second"));
    assert_eq!(all[1].0, ExecutionId::new(2));
}

#[test]
fn empty_store() {
    let store = LogStore::new();
    assert!(store.is_empty());
    assert!(store.read_all().is_empty());
}
