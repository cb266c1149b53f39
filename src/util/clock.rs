//! Wall-clock access.
//!
//! Every timestamp in the facility is milliseconds since the Unix epoch. The
//! service reads time through the [`Clock`] trait so stays and bills can be
//! driven deterministically with a [`ManualClock`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};

use super::types::TimestampMs;

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_ms() -> TimestampMs {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

/// Render a millisecond timestamp as `YYYY-MM-DD HH:MM:SS` (UTC).
pub fn format_ms(ms: TimestampMs) -> String {
    i64::try_from(ms)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map_or_else(
            || "-".to_string(),
            |dt| dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        )
}

/// Elapsed time between two timestamps, saturating at zero.
pub fn elapsed(start_ms: TimestampMs, end_ms: TimestampMs) -> Duration {
    let millis = end_ms.saturating_sub(start_ms);
    Duration::from_millis(u64::try_from(millis).unwrap_or(u64::MAX))
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Current time in milliseconds since the Unix epoch.
    fn now_ms(&self) -> TimestampMs;
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> TimestampMs {
        now_ms()
    }
}

/// Manually advanced clock. Clones share the same instant.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    current: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock frozen at `start_ms`.
    pub fn new(start_ms: u64) -> Self {
        Self {
            current: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        let step = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        self.current.fetch_add(step, Ordering::AcqRel);
    }

    /// Jump to an absolute instant.
    pub fn set(&self, ms: u64) {
        self.current.store(ms, Ordering::Release);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> TimestampMs {
        TimestampMs::from(self.current.load(Ordering::Acquire))
    }
}
