// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::net::IpAddr;
use std::path::PathBuf;

/// Port the daemon listens on unless `SR_PORT` says otherwise.
pub const DEFAULT_PORT: u16 = 2100;

/// Default multipart body limit (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Bind address (`SR_HOST`, default all interfaces).
pub fn host() -> IpAddr {
    std::env::var("SR_HOST")
        .ok()
        .and_then(|s| s.parse::<IpAddr>().ok())
        .unwrap_or(IpAddr::from([0, 0, 0, 0]))
}

/// Listening port (`SR_PORT`).
pub fn port() -> u16 {
    std::env::var("SR_PORT").ok().and_then(|s| s.parse::<u16>().ok()).unwrap_or(DEFAULT_PORT)
}

/// Program that runs uploaded scripts (`SR_SCRIPT_INTERPRETER`).
pub fn script_interpreter() -> Option<PathBuf> {
    non_empty("SR_SCRIPT_INTERPRETER").map(PathBuf::from)
}

/// Shell for raw commands (`SR_SHELL`).
pub fn shell() -> Option<PathBuf> {
    non_empty("SR_SHELL").map(PathBuf::from)
}

/// Staging directory for uploaded scripts (`SR_TEMP_DIR`).
pub fn temp_dir() -> Option<PathBuf> {
    non_empty("SR_TEMP_DIR").map(PathBuf::from)
}

/// Static asset directory (`SR_PUBLIC_DIR`, default `public`).
pub fn public_dir() -> PathBuf {
    non_empty("SR_PUBLIC_DIR").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("public"))
}

/// Upload body limit in bytes (`SR_MAX_UPLOAD_BYTES`).
pub fn max_upload_bytes() -> usize {
    std::env::var("SR_MAX_UPLOAD_BYTES")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
}

/// Per-stream output capture limit in bytes (`SR_MAX_OUTPUT_BYTES`).
/// Unset or malformed leaves the engine default.
pub fn max_output_bytes() -> Option<usize> {
    non_empty("SR_MAX_OUTPUT_BYTES").and_then(|s| s.trim().parse::<usize>().ok())
}

/// Directory for the daemon log file (`SR_LOG_DIR`). Unset means stderr only.
pub fn log_dir() -> Option<PathBuf> {
    non_empty("SR_LOG_DIR").map(PathBuf::from)
}

fn non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
