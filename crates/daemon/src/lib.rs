// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Script runner daemon library
//!
//! Exposes the HTTP router and lifecycle so the binary and tests can share
//! them.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod env;
pub mod http;
pub mod lifecycle;
pub mod logging;

pub use http::{router, AppState};
pub use lifecycle::{Config, LifecycleError};
