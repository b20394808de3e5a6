// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon startup and the serve loop.

use std::future::Future;
use std::sync::Arc;

use sr_engine::ExecutionEngine;
use tokio::net::TcpListener;
use tracing::info;

use super::{Config, LifecycleError, StartupResult};
use crate::http::{self, AppState};

/// Prepare the staging directory, build the engine, and bind the listener.
pub async fn startup(config: &Config) -> Result<StartupResult, LifecycleError> {
    let temp_dir = &config.engine.temp_dir;
    tokio::fs::create_dir_all(temp_dir)
        .await
        .map_err(|source| LifecycleError::TempDir { path: temp_dir.clone(), source })?;

    let addr = config.addr();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| LifecycleError::BindFailed { addr, source })?;

    info!(
        interpreter = %config.engine.interpreter.display(),
        shell = %config.engine.shell.display(),
        temp_dir = %temp_dir.display(),
        "engine configured"
    );

    Ok(StartupResult {
        engine: Arc::new(ExecutionEngine::new(config.engine.clone())),
        listener,
    })
}

/// Serve HTTP until Ctrl-C or SIGTERM.
pub async fn serve(config: &Config, started: StartupResult) -> Result<(), LifecycleError> {
    serve_until(config, started, shutdown_signal()).await
}

/// Serve HTTP until `signal` resolves, then kill and record every execution
/// still running.
pub async fn serve_until<F>(
    config: &Config,
    started: StartupResult,
    signal: F,
) -> Result<(), LifecycleError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let StartupResult { engine, listener } = started;
    let state = AppState::new(Arc::clone(&engine), config.public_dir.clone());
    let app = http::router(state, config.max_upload_bytes);

    let local = listener.local_addr()?;
    info!("Server is running at http://{local}");

    let served = axum::serve(listener, app).with_graceful_shutdown(signal).await;
    engine.shutdown().await;
    served?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        _ = ctrl_c => info!("received ctrl-c, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
