// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: configuration, startup, shutdown.

mod startup;
pub use startup::{serve, serve_until, startup};

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use sr_engine::{EngineConfig, ExecutionEngine};
use thiserror::Error;
use tokio::net::TcpListener;

use crate::env;

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Static asset directory served as the router fallback
    pub public_dir: PathBuf,
    /// Multipart body limit in bytes
    pub max_upload_bytes: usize,
    /// Directory for the daemon log file, if file logging is enabled
    pub log_dir: Option<PathBuf>,
    /// How scripts and commands are launched
    pub engine: EngineConfig,
}

impl Config {
    /// Load configuration from `SR_*` environment variables.
    pub fn load() -> Self {
        let mut engine = EngineConfig::default();
        if let Some(interpreter) = env::script_interpreter() {
            engine = engine.interpreter(interpreter);
        }
        if let Some(shell) = env::shell() {
            engine = engine.shell(shell);
        }
        if let Some(temp_dir) = env::temp_dir() {
            engine = engine.temp_dir(temp_dir);
        }
        if let Some(limit) = env::max_output_bytes() {
            engine = engine.max_output_bytes(limit);
        }

        Self {
            host: env::host(),
            port: env::port(),
            public_dir: env::public_dir(),
            max_upload_bytes: env::max_upload_bytes(),
            log_dir: env::log_dir(),
            engine,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Daemon state after startup: the engine plus the bound listener.
pub struct StartupResult {
    pub engine: Arc<ExecutionEngine>,
    pub listener: TcpListener,
}

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("failed to bind {addr}: {source}")]
    BindFailed {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("script staging directory {path} is unusable: {source}")]
    TempDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
