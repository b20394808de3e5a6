// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    running   = { ExecutionStatus::Running, false, "running" },
    completed = { ExecutionStatus::Completed, true, "completed" },
    failed    = { ExecutionStatus::Failed("exit status: 1".into()), true, "failed" },
)]
fn status_terminal_and_display(status: ExecutionStatus, terminal: bool, label: &str) {
    assert_eq!(status.is_terminal(), terminal);
    assert_eq!(status.to_string(), label);
}

#[test]
fn failure_reason_only_for_failed() {
    assert_eq!(ExecutionStatus::Completed.failure_reason(), None);
    assert_eq!(
        ExecutionStatus::Failed("boom".into()).failure_reason(),
        Some("boom")
    );
}

#[test]
fn script_source_label_is_upload_name() {
    let source = ExecutionSource::Script {
        path: PathBuf::from("/tmp/script-1.js"),
        original_name: "hello.js".into(),
    };
    assert_eq!(source.label(), "hello.js");
}

#[test]
fn command_source_label_is_command_line() {
    let source = ExecutionSource::Command { command_line: "echo hi".into() };
    assert_eq!(source.label(), "echo hi");
}

#[test]
fn status_serializes_with_reason() {
    let json = serde_json::to_string(&ExecutionStatus::Failed("killed".into())).unwrap();
    assert_eq!(json, r#"{"status":"failed","reason":"killed"}"#);
}
