// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::clock::FakeClock;
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

// --- ExecutionId parsing ---

#[yare::parameterized(
    plain     = { "1700000000000", Some(1_700_000_000_000) },
    zero      = { "0", Some(0) },
    empty     = { "", None },
    negative  = { "-5", None },
    plus_sign = { "+5", None },
    alpha     = { "abc", None },
    mixed     = { "12ab", None },
    spaced    = { " 12", None },
    overflow  = { "99999999999999999999999", None },
)]
fn parse_execution_id(input: &str, expected: Option<u64>) {
    let parsed = input.parse::<ExecutionId>().ok().map(ExecutionId::get);
    assert_eq!(parsed, expected);
}

#[test]
fn display_is_decimal() {
    assert_eq!(ExecutionId::new(42).to_string(), "42");
}

#[test]
fn serializes_as_bare_number() {
    let json = serde_json::to_string(&ExecutionId::new(7)).unwrap();
    assert_eq!(json, "7");
}

// --- IdAllocator ---

#[test]
fn allocator_uses_clock_time() {
    let clock = FakeClock::at(1_700_000_000_000);
    let ids = IdAllocator::new(clock);
    assert_eq!(ids.next().get(), 1_700_000_000_000);
}

#[test]
fn same_millisecond_ids_are_disambiguated() {
    let clock = FakeClock::at(5_000);
    let ids = IdAllocator::new(clock);
    assert_eq!(ids.next().get(), 5_000);
    assert_eq!(ids.next().get(), 5_001);
    assert_eq!(ids.next().get(), 5_002);
}

#[test]
fn allocator_catches_up_with_clock() {
    let clock = FakeClock::at(5_000);
    let ids = IdAllocator::new(clock.clone());
    ids.next();
    ids.next();
    clock.advance(Duration::from_millis(100));
    assert_eq!(ids.next().get(), 5_100);
}

#[test]
fn clock_stepping_backwards_never_reuses_ids() {
    let clock = FakeClock::at(5_000);
    let ids = IdAllocator::new(clock.clone());
    let first = ids.next();
    clock.set_epoch_ms(1_000);
    let second = ids.next();
    assert!(second > first);
}

#[test]
fn concurrent_allocation_is_unique() {
    let ids = Arc::new(IdAllocator::new(FakeClock::at(1)));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let ids = Arc::clone(&ids);
            std::thread::spawn(move || (0..500).map(|_| ids.next()).collect::<Vec<_>>())
        })
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(seen.insert(id), "duplicate id {id}");
        }
    }
    assert_eq!(seen.len(), 4_000);
}

proptest! {
    #[test]
    fn ids_strictly_increase_for_any_clock_sequence(
        steps in proptest::collection::vec(0u64..10_000, 1..64)
    ) {
        let clock = FakeClock::at(0);
        let ids = IdAllocator::new(clock.clone());
        let mut previous: Option<ExecutionId> = None;
        for ms in steps {
            clock.set_epoch_ms(ms);
            let id = ids.next();
            if let Some(prev) = previous {
                prop_assert!(id > prev);
            }
            prop_assert!(id.get() >= ms);
            previous = Some(id);
        }
    }
}
