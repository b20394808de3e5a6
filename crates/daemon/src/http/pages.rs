// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTML rendering for the web pages.
//!
//! Every interpolated value passes through [`escape`].

use std::fmt::Write as _;

use sr_core::{ExecutionId, LogRecord};
use sr_engine::RunningExecution;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="/styles.css">
</head>
<body>
    <div class="container">
{body}
    </div>
</body>
</html>
"#,
        title = escape(title),
    )
}

fn running_list(running: &[RunningExecution]) -> String {
    let mut out = String::from("<ul>\n");
    for entry in running {
        // Writing into a String cannot fail
        let _ = writeln!(
            out,
            r#"<li>Script ID: {id} <code>{label}</code> <button onclick="window.location.href='/stop/{id}'">Stop</button></li>"#,
            id = entry.id,
            label = escape(&entry.label),
        );
    }
    out.push_str("</ul>");
    out
}

/// `GET /`: upload form and running executions.
pub fn index(running: &[RunningExecution]) -> String {
    let body = format!(
        r#"<h1>Upload and Manage Scripts</h1>
<form action="/upload" method="POST" enctype="multipart/form-data">
    <label for="script">Choose a script (.js or .cjs):</label><br><br>
    <input type="file" name="script" id="script" accept=".js,.cjs" required><br><br>
    <button type="submit">Upload and Run Script</button>
</form>
<h2>Running Scripts</h2>
{running}
<h2><a href="/output">View Logs</a></h2>
<p><a href="/node">Run a command</a></p>"#,
        running = running_list(running),
    );
    layout("Script Manager", &body)
}

/// `GET /node`: command form and running executions.
pub fn command_form(running: &[RunningExecution]) -> String {
    let body = format!(
        r#"<h1>Run a Command</h1>
<form action="/node" method="POST">
    <label for="command">Command:</label><br><br>
    <input type="text" name="command" id="command" required><br><br>
    <button type="submit">Run Command</button>
</form>
<h2>Running Scripts</h2>
{running}
<h2><a href="/output">View Logs</a></h2>
<p><a href="/">Go back</a></p>"#,
        running = running_list(running),
    );
    layout("Run Command", &body)
}

/// `POST /upload` success page.
pub fn script_started(original_name: &str, id: ExecutionId) -> String {
    let body = format!(
        r#"<p>Script "{name}" is now running.</p>
<p>Script ID: {id}</p>
<p><a href="/output?id={id}">View output</a></p>
<p><a href="/">Go back</a></p>"#,
        name = escape(original_name),
    );
    layout("Script Running", &body)
}

/// `POST /node` success page.
pub fn command_started(command_line: &str, id: ExecutionId) -> String {
    let body = format!(
        r#"<p>Command is now running:</p>
<pre>{command}</pre>
<p>Script ID: {id}</p>
<p><a href="/output?id={id}">View output</a></p>
<p><a href="/node">Go back</a></p>"#,
        command = escape(command_line),
    );
    layout("Command Running", &body)
}

/// `GET /stop/{id}` confirmation.
pub fn stopped(id: ExecutionId) -> String {
    let body = format!(
        r#"<p>Script with ID {id} has been stopped.</p>
<p><a href="/">Go back</a></p>"#
    );
    layout("Script Stopped", &body)
}

/// `GET /output?id=...` for a known id.
pub fn single_log(record: &LogRecord) -> String {
    let body = format!(
        r#"<h1>Script Logs</h1>
<h3>Script ID: {id}</h3>
<p>Status: {status}</p>
<pre>{log}</pre>
<p><a href="/">Go back</a></p>"#,
        id = record.id,
        status = record.status,
        log = escape(&record.render()),
    );
    layout("Script Logs", &body)
}

/// `GET /output` listing every stored log.
pub fn all_logs(records: &[(ExecutionId, LogRecord)]) -> String {
    let mut logs = String::new();
    for (id, record) in records {
        let _ = writeln!(
            logs,
            "<h3>Script ID: {id}</h3><pre>{log}</pre><hr>",
            log = escape(&record.render()),
        );
    }
    if logs.is_empty() {
        logs.push_str("<p>No logs available.</p>");
    }
    let body = format!(
        r#"<h1>All Script Logs</h1>
{logs}
<p><a href="/">Go back</a></p>"#
    );
    layout("All Script Logs", &body)
}

#[cfg(test)]
#[path = "pages_tests.rs"]
mod tests;
