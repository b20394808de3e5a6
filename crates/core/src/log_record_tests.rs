// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn id() -> ExecutionId {
    ExecutionId::new(1700)
}

#[yare::parameterized(
    clean_exit   = { ExitOutcome::Exited(0), false, Some(0) },
    nonzero_exit = { ExitOutcome::Exited(3), true, Some(3) },
    signaled     = { ExitOutcome::Signaled(15), true, None },
    terminated   = { ExitOutcome::Terminated, true, None },
    spawn_error  = { ExitOutcome::Error("No such file or directory".into()), true, None },
)]
fn outcome_maps_to_status(outcome: ExitOutcome, failed: bool, code: Option<i32>) {
    let status = outcome.status();
    assert!(status.is_terminal());
    assert_eq!(status.failure_reason().is_some(), failed);
    assert_eq!(outcome.exit_code(), code);
}

#[test]
fn clean_exit_has_stdout_and_no_error() {
    let record = LogRecord::from_outcome(id(), &ExitOutcome::Exited(0), "hello\n", "", 9);
    assert_eq!(record.status, ExecutionStatus::Completed);
    assert!(!record.has_error());
    assert_eq!(record.stdout(), Some("hello\n"));
    assert_eq!(record.stderr(), None);
    assert_eq!(record.lines.len(), 1);
}

#[test]
fn nonzero_exit_error_mentions_exit_status() {
    let record = LogRecord::from_outcome(id(), &ExitOutcome::Exited(1), "", "", 9);
    let error = record.error().unwrap();
    assert!(error.contains("non-zero"), "{error}");
    assert!(error.contains('1'), "{error}");
    assert_eq!(record.stdout(), None);
    assert_eq!(record.exit_code, Some(1));
}

#[test]
fn lines_are_ordered_error_stderr_stdout() {
    let record = LogRecord::from_outcome(id(), &ExitOutcome::Exited(2), "out", "err", 9);
    assert_eq!(
        record.lines,
        vec![
            LogLine::Error("process exited with non-zero status 2".into()),
            LogLine::Stderr("err".into()),
            LogLine::Stdout("out".into()),
        ]
    );
}

#[test]
fn render_tags_each_line_with_id() {
    let record = LogRecord::from_outcome(id(), &ExitOutcome::Exited(2), "out", "err", 9);
    assert_eq!(
        record.render(),
        "Error executing script 1700: process exited with non-zero status 2\n\
         stderr from script 1700: err\n\
         stdout from script 1700: out\n"
    );
}

#[test]
fn empty_successful_run_renders_nothing() {
    let record = LogRecord::from_outcome(id(), &ExitOutcome::Exited(0), "", "", 9);
    assert!(record.lines.is_empty());
    assert_eq!(record.render(), "");
}
