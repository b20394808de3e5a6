// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP surface: forms, uploads, stop links, and log pages over the engine.
//!
//! | Route            | Engine call                    |
//! |------------------|--------------------------------|
//! | `GET /`          | running list                   |
//! | `POST /upload`   | `spawn_script`                 |
//! | `GET /node`      | running list                   |
//! | `POST /node`     | `spawn_command`                |
//! | `GET /stop/{id}` | `terminate`                    |
//! | `GET /output`    | `read_log` / log store listing |
//!
//! Anything else falls through to the static asset directory.

mod error;
mod handlers;
pub mod pages;

pub use error::{ApiError, ApiResult};

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use sr_engine::ExecutionEngine;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Shared state for all handlers.
pub struct AppState {
    pub engine: Arc<ExecutionEngine>,
    pub public_dir: PathBuf,
}

impl AppState {
    pub fn new(engine: Arc<ExecutionEngine>, public_dir: PathBuf) -> Self {
        Self { engine, public_dir }
    }
}

/// Build the application router.
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    let assets = ServeDir::new(&state.public_dir);
    Router::new()
        .route("/", get(handlers::index))
        .route("/upload", post(handlers::upload))
        .route("/node", get(handlers::command_form).post(handlers::run_command))
        .route("/stop/{id}", get(handlers::stop))
        .route("/output", get(handlers::output))
        .fallback_service(assets)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

#[cfg(test)]
mod tests;
