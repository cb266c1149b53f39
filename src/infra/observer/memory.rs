//! In-memory observer that records every transition it sees.

use parking_lot::Mutex;

use crate::core::{LotObserver, LotTransition};
use crate::util::types::LotId;

/// Recorded notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotEvent {
    /// Lot that transitioned.
    pub lot_id: LotId,
    /// Direction of the transition.
    pub transition: LotTransition,
}

/// Observer that keeps every notification, for tests and diagnostics.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<LotEvent>>,
}

impl RecordingObserver {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events, oldest first.
    pub fn events(&self) -> Vec<LotEvent> {
        self.events.lock().clone()
    }

    /// Number of recorded events with the given direction.
    pub fn count(&self, transition: LotTransition) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|e| e.transition == transition)
            .count()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.events.lock().clear();
    }

    fn push(&self, lot_id: &str, transition: LotTransition) {
        self.events.lock().push(LotEvent {
            lot_id: lot_id.to_string(),
            transition,
        });
    }
}

impl LotObserver for RecordingObserver {
    fn on_lot_full(&self, lot_id: &str) {
        self.push(lot_id, LotTransition::Full);
    }

    fn on_lot_available(&self, lot_id: &str) {
        self.push(lot_id, LotTransition::Available);
    }
}
