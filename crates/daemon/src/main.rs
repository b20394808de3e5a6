// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! srd: script runner daemon

use anyhow::Context;
use sr_daemon::lifecycle::{self, Config};
use sr_daemon::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load();
    if let Some(dir) = &config.log_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    }
    let _log_guard = logging::init(config.log_dir.as_deref());

    let started = lifecycle::startup(&config).await.context("daemon startup failed")?;
    lifecycle::serve(&config, started).await.context("daemon stopped with an error")?;
    Ok(())
}
