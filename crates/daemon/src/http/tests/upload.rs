// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `POST /upload` and the index page.

use super::*;

#[tokio::test]
async fn upload_runs_script_and_returns_id() {
    let app = app();
    let (status, html) = app.upload("script", "hello.js", "echo hello").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"Script "hello.js" is now running."#));

    let id = extract_id(&html);
    let record = app.wait_for_log(id).await;
    assert_eq!(record.stdout(), Some("hello\n"));
    assert!(!record.has_error());
}

#[tokio::test]
async fn upload_without_script_field_is_rejected() {
    let app = app();
    let (status, body) = app.upload("other", "hello.js", "echo hello").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "No file uploaded.");
    assert!(app.engine.registry().is_empty());
}

#[tokio::test]
async fn upload_with_empty_file_name_is_rejected() {
    let app = app();
    let (status, body) = app.upload("script", "", "echo hello").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "No file uploaded.");
}

#[tokio::test]
async fn upload_with_bad_extension_is_rejected() {
    let app = app();
    let (status, body) = app.upload("script", "payload.sh", "echo hello").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Only .js or .cjs files are allowed.");
    assert!(app.engine.registry().is_empty());
    assert!(app.engine.logs().is_empty());
}

#[tokio::test]
async fn upload_that_is_not_multipart_is_a_client_error() {
    let app = app();
    let request = Request::post("/upload")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("echo hello"))
        .unwrap();

    let (status, _) = app.send(request).await;

    assert!(status.is_client_error(), "{status}");
    assert!(app.engine.registry().is_empty());
}

#[tokio::test]
async fn index_lists_running_scripts() {
    let app = app();
    let (_, html) = app.upload("script", "long.cjs", "sleep 30").await;
    let id = extract_id(&html);

    let (status, index) = app.get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(index.contains(&format!("Script ID: {id}")));
    assert!(index.contains(&format!("/stop/{id}")));
    app.engine.terminate(id).unwrap();
}
