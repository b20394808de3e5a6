// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution identifiers and their allocation.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};

/// Identifier naming one execution.
///
/// Rendered as a plain decimal number (epoch milliseconds, bumped past the
/// previous id when two executions start within the same millisecond).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ExecutionId(u64);

impl ExecutionId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ExecutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ExecutionId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Error returned when text is not a valid execution id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid execution id: {0:?}")]
pub struct ParseIdError(pub String);

impl FromStr for ExecutionId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // u64::from_str accepts a leading '+', ids never carry one
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseIdError(s.to_string()));
        }
        s.parse::<u64>().map(Self).map_err(|_| ParseIdError(s.to_string()))
    }
}

/// Allocates time-derived, strictly increasing execution ids.
///
/// Each id is `max(clock.epoch_ms(), previous + 1)`, so ids read like
/// timestamps but never collide, even when many executions start in the
/// same millisecond or the wall clock steps backwards.
#[derive(Debug)]
pub struct IdAllocator<C: Clock = SystemClock> {
    clock: C,
    last: AtomicU64,
}

impl<C: Clock> IdAllocator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock, last: AtomicU64::new(0) }
    }

    pub fn next(&self) -> ExecutionId {
        let now = self.clock.epoch_ms();
        let mut current = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(current.saturating_add(1));
            match self.last.compare_exchange_weak(
                current,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return ExecutionId(candidate),
                Err(observed) => current = observed,
            }
        }
    }
}

impl Default for IdAllocator<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
