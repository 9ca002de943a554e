// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn system_clock_is_past_2020() {
    // 2020-01-01T00:00:00Z
    assert!(SystemClock.epoch_ms() > 1_577_836_800_000);
}

#[test]
fn fake_clock_can_be_advanced() {
    let clock = FakeClock::new();
    let before = clock.epoch_ms();
    clock.advance(Duration::from_secs(60));
    assert_eq!(clock.epoch_ms(), before + 60_000);
}

#[test]
fn fake_clock_is_cloneable_and_shared() {
    let clock1 = FakeClock::new();
    let clock2 = clock1.clone();
    clock2.set_epoch_ms(42);
    assert_eq!(clock1.epoch_ms(), 42);
}

#[test]
fn timestamp_is_compact_utc() {
    let clock = FakeClock::new();
    // 2026-10-15T09:30:05Z
    clock.set_epoch_ms(1_792_056_605_000);
    assert_eq!(clock.timestamp(), "20261015-093005");
}

#[test]
fn epoch_start_formats() {
    let clock = FakeClock::new();
    clock.set_epoch_ms(0);
    assert_eq!(clock.timestamp(), "19700101-000000");
}
