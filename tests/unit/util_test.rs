//! Tests for utility modules

use std::time::Duration;

use prometheus_parking_facility::util::{elapsed, format_ms, now_ms, Clock, ManualClock, SystemClock};

#[test]
fn test_now_ms_advances() {
    let a = now_ms();
    let b = SystemClock.now_ms();
    assert!(b >= a);
    assert!(a > 0);
}

#[test]
fn test_manual_clock_advance_and_set() {
    let clock = ManualClock::new(1_000);
    clock.advance(Duration::from_secs(2));
    assert_eq!(clock.now_ms(), 3_000);
    clock.set(10);
    assert_eq!(clock.now_ms(), 10);
}

#[test]
fn test_elapsed_saturates() {
    assert_eq!(elapsed(1_000, 4_500), Duration::from_millis(3_500));
    assert_eq!(elapsed(5_000, 1_000), Duration::ZERO);
}

#[test]
fn test_format_ms() {
    assert_eq!(format_ms(0), "1970-01-01 00:00:00");
    assert_eq!(format_ms(86_400_000 + 3_661_000), "1970-01-02 01:01:01");
}

#[test]
fn test_init_tracing_is_idempotent() {
    prometheus_parking_facility::util::init_tracing();
    prometheus_parking_facility::util::init_tracing();
    assert!(!prometheus_parking_facility::util::DEFAULT_LOG_DIRECTIVE.is_empty());
}
