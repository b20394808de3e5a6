// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sr-core: data model for the script runner daemon

pub mod macros;

pub mod clock;
pub mod execution;
pub mod id;
pub mod log_record;

pub use clock::{Clock, FakeClock, SystemClock};
pub use execution::{ExecutionSource, ExecutionStatus};
pub use id::{ExecutionId, IdAllocator, ParseIdError};
pub use log_record::{ExitOutcome, LogLine, LogRecord};
