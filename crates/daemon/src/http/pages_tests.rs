// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use sr_core::ExitOutcome;

fn running(id: u64, label: &str) -> RunningExecution {
    RunningExecution {
        id: ExecutionId::new(id),
        pid: Some(1),
        label: label.to_string(),
        started_at_ms: 0,
    }
}

#[test]
fn escape_covers_markup_characters() {
    assert_eq!(
        escape(r#"<a href="x">'&'</a>"#),
        "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
    );
    assert_eq!(escape("plain text"), "plain text");
}

#[test]
fn index_lists_running_ids_with_stop_links() {
    let html = index(&[running(11, "a.js"), running(12, "b.js")]);
    assert!(html.contains("Script ID: 11"));
    assert!(html.contains("/stop/11"));
    assert!(html.contains("/stop/12"));
    assert!(html.contains(r#"action="/upload""#));
}

#[test]
fn running_labels_are_escaped() {
    let html = command_form(&[running(1, "echo <script>")]);
    assert!(html.contains("echo &lt;script&gt;"));
    assert!(!html.contains("echo <script>"));
}

#[test]
fn started_page_escapes_file_name() {
    let html = script_started("<img src=x>.js", ExecutionId::new(5));
    assert!(html.contains("&lt;img src=x&gt;.js"));
    assert!(html.contains("Script ID: 5"));
    assert!(html.contains("/output?id=5"));
}

#[test]
fn single_log_shows_rendered_output() {
    let record =
        LogRecord::from_outcome(ExecutionId::new(3), &ExitOutcome::Exited(0), "<b>hi</b>", "", 0);
    let html = single_log(&record);
    assert!(html.contains("Script ID: 3"));
    assert!(html.contains("stdout from script 3: &lt;b&gt;hi&lt;/b&gt;"));
    assert!(html.contains("Status: completed"));
}

#[test]
fn all_logs_empty_placeholder() {
    assert!(all_logs(&[]).contains("No logs available."));
}

#[test]
fn all_logs_lists_each_record() {
    let records: Vec<_> = [1, 2]
        .into_iter()
        .map(|n| {
            let id = ExecutionId::new(n);
            (id, LogRecord::from_outcome(id, &ExitOutcome::Exited(0), "x", "", 0))
        })
        .collect();
    let html = all_logs(&records);
    assert!(html.contains("Script ID: 1"));
    assert!(html.contains("Script ID: 2"));
    assert!(!html.contains("No logs available."));
}
