//! Observers for the people who react to capacity changes.
//!
//! The owner puts out a "full" sign; security staff redirect traffic away
//! from full lots. Both track which lots are currently full so callers can
//! query the state they are acting on.

use std::collections::BTreeSet;

use parking_lot::Mutex;

use crate::core::LotObserver;
use crate::util::types::LotId;

/// Lot owner. Shows a full sign while a lot is full.
#[derive(Debug)]
pub struct OwnerObserver {
    owner: String,
    signs: Mutex<BTreeSet<LotId>>,
}

impl OwnerObserver {
    /// Observer for the named owner.
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            signs: Mutex::new(BTreeSet::new()),
        }
    }

    /// Owner name.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Whether the full sign is out at `lot_id`.
    pub fn sign_shown(&self, lot_id: &str) -> bool {
        self.signs.lock().contains(lot_id)
    }
}

impl LotObserver for OwnerObserver {
    fn on_lot_full(&self, lot_id: &str) {
        tracing::info!(owner = %self.owner, lot = lot_id, "owner notified: put out the full sign");
        self.signs.lock().insert(lot_id.to_string());
    }

    fn on_lot_available(&self, lot_id: &str) {
        tracing::info!(owner = %self.owner, lot = lot_id, "owner notified: remove the full sign");
        self.signs.lock().remove(lot_id);
    }
}

/// Security staff member redirecting traffic away from full lots.
#[derive(Debug)]
pub struct SecurityObserver {
    staff_id: String,
    redirecting: Mutex<BTreeSet<LotId>>,
}

impl SecurityObserver {
    /// Observer for the given staff member.
    pub fn new(staff_id: impl Into<String>) -> Self {
        Self {
            staff_id: staff_id.into(),
            redirecting: Mutex::new(BTreeSet::new()),
        }
    }

    /// Staff identifier.
    pub fn staff_id(&self) -> &str {
        &self.staff_id
    }

    /// Lots currently being redirected away from.
    pub fn redirected_lots(&self) -> Vec<LotId> {
        self.redirecting.lock().iter().cloned().collect()
    }
}

impl LotObserver for SecurityObserver {
    fn on_lot_full(&self, lot_id: &str) {
        tracing::info!(staff = %self.staff_id, lot = lot_id, "security notified: redirect traffic");
        self.redirecting.lock().insert(lot_id.to_string());
    }

    fn on_lot_available(&self, lot_id: &str) {
        tracing::info!(staff = %self.staff_id, lot = lot_id, "security notified: stop redirecting");
        self.redirecting.lock().remove(lot_id);
    }
}
