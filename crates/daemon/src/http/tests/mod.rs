// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process tests for the HTTP surface.

use super::*;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use sr_core::{ExecutionId, LogRecord};
use sr_engine::EngineConfig;
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

mod upload;

const BOUNDARY: &str = "sr-test-boundary";

pub(crate) struct TestApp {
    pub router: Router,
    pub engine: Arc<ExecutionEngine>,
    pub public: TempDir,
    _staging: TempDir,
}

/// Router over an engine that interprets scripts with `/bin/sh`.
pub(crate) fn app() -> TestApp {
    let staging = tempfile::tempdir().unwrap();
    let public = tempfile::tempdir().unwrap();
    let config = EngineConfig::default().interpreter("/bin/sh").temp_dir(staging.path());
    let engine = Arc::new(ExecutionEngine::new(config));
    let state = AppState::new(Arc::clone(&engine), public.path().to_path_buf());
    TestApp { router: router(state, 1024 * 1024), engine, public, _staging: staging }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post_command(&self, command: &str) -> (StatusCode, String) {
        let body = format!("command={}", form_encode(command));
        let request = Request::post("/node")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    pub async fn upload(&self, field: &str, file_name: &str, content: &str) -> (StatusCode, String) {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
             Content-Type: application/javascript\r\n\r\n\
             {content}\r\n\
             --{BOUNDARY}--\r\n"
        );
        let request = Request::post("/upload")
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    /// Poll until the engine holds a log record for `id`.
    pub async fn wait_for_log(&self, id: ExecutionId) -> LogRecord {
        tokio::time::timeout(Duration::from_secs(10), async {
            loop {
                if let Ok(record) = self.engine.read_log(id) {
                    return record;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap_or_else(|_| panic!("no log record for {id}"))
    }
}

/// Pull the id out of a "Script ID: N" line.
pub(crate) fn extract_id(html: &str) -> ExecutionId {
    let start = html.find("Script ID: ").unwrap() + "Script ID: ".len();
    let digits: String = html[start..].chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap()
}

fn form_encode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'*' => {
                (b as char).to_string()
            }
            b' ' => "+".to_string(),
            _ => format!("%{b:02X}"),
        })
        .collect()
}
