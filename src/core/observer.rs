//! Capacity edge-transition observers.
//!
//! A lot notifies its observers only when it crosses the full boundary:
//! not-full to full fires [`LotObserver::on_lot_full`], full to not-full fires
//! [`LotObserver::on_lot_available`]. Admissions and releases that stay on the
//! same side of the boundary are silent.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Receiver of lot capacity transitions.
///
/// Callbacks run synchronously inside the admit/release that caused them.
pub trait LotObserver: Send + Sync {
    /// The lot just became full.
    fn on_lot_full(&self, lot_id: &str);
    /// The lot just regained a free space after being full.
    fn on_lot_available(&self, lot_id: &str);
}

/// Direction of a capacity edge crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LotTransition {
    /// not-full to full.
    Full,
    /// full to not-full.
    Available,
}

/// Registration token returned by `add_observer`.
///
/// Removal goes through the token, so two observers with identical contents
/// are still told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObserverHandle(u64);

impl ObserverHandle {
    /// Raw token value.
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Handle values are unique across every lot in the process.
static NEXT_HANDLE: AtomicU64 = AtomicU64::new(0);

/// Observers of one lot, kept in registration order.
#[derive(Default)]
pub(crate) struct ObserverRegistry {
    entries: Vec<(ObserverHandle, Arc<dyn LotObserver>)>,
}

impl ObserverRegistry {
    pub(crate) fn register(&mut self, observer: Arc<dyn LotObserver>) -> ObserverHandle {
        let handle = ObserverHandle(NEXT_HANDLE.fetch_add(1, Ordering::Relaxed));
        self.entries.push((handle, observer));
        handle
    }

    pub(crate) fn remove(&mut self, handle: ObserverHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(h, _)| *h != handle);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn notify(&self, lot_id: &str, transition: LotTransition) {
        for (_, observer) in &self.entries {
            match transition {
                LotTransition::Full => observer.on_lot_full(lot_id),
                LotTransition::Available => observer.on_lot_available(lot_id),
            }
        }
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.entries.len())
            .finish()
    }
}
