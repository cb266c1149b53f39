//! Attendants and their allocation decisions.

use serde::{Deserialize, Serialize};

use crate::core::{AllocationStrategy, Lot, ParkingError, Vehicle};
use crate::util::types::{AttendantId, LotId, SpaceId};

/// Reason recorded when no strategy is supplied.
pub const FIRST_AVAILABLE_REASON: &str = "First available space strategy";

/// Proposed placement for a vehicle. Nothing is reserved until the caller
/// occupies the named space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Attendant who made the call.
    pub attendant_id: AttendantId,
    /// Selected lot.
    pub lot_id: LotId,
    /// First free space in the selected lot.
    pub space_id: SpaceId,
    /// Which policy produced the placement.
    pub reason: String,
}

/// Parking attendant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendant {
    id: AttendantId,
    name: String,
    lot_id: Option<LotId>,
    active: bool,
}

impl Attendant {
    /// Create an active attendant, optionally stationed at a lot.
    pub fn new(id: impl Into<AttendantId>, name: impl Into<String>, lot_id: Option<LotId>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            lot_id,
            active: true,
        }
    }

    /// Attendant id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lot the attendant is stationed at.
    pub fn lot_id(&self) -> Option<&str> {
        self.lot_id.as_deref()
    }

    /// Whether the attendant is on duty.
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Put the attendant on or off duty.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Propose a lot and space for `vehicle`.
    ///
    /// Without a strategy the attendant takes the first lot with room in
    /// iteration order. With one, the strategy picks the lot and the attendant
    /// finds its first free space.
    pub fn make_decision(
        &self,
        lots: &[Lot],
        vehicle: &Vehicle,
        strategy: Option<AllocationStrategy>,
    ) -> Result<Decision, ParkingError> {
        if !self.active {
            return Err(ParkingError::AttendantInactive(self.id.clone()));
        }

        let Some(strategy) = strategy else {
            return lots
                .iter()
                .filter(|lot| !lot.is_full())
                .find_map(|lot| {
                    lot.find_available_space()
                        .map(|space| self.decision(lot, space.id(), FIRST_AVAILABLE_REASON.to_string()))
                })
                .ok_or(ParkingError::NoLotAvailable);
        };

        let lot = strategy.select_lot(lots, vehicle)?;
        // Unreachable while `Lot::occupied` tracks its spaces: strategies only
        // return non-full lots, and a non-full lot always has a free space.
        let space = lot
            .find_available_space()
            .ok_or_else(|| ParkingError::NoSpaceInSelectedLot(lot.id().to_string()))?;
        Ok(self.decision(lot, space.id(), format!("Strategy: {}", strategy.name())))
    }

    fn decision(&self, lot: &Lot, space_id: SpaceId, reason: String) -> Decision {
        tracing::debug!(
            attendant = %self.id,
            lot = lot.id(),
            space = space_id,
            reason = %reason,
            "parking decision made"
        );
        Decision {
            attendant_id: self.id.clone(),
            lot_id: lot.id().to_string(),
            space_id,
            reason,
        }
    }
}
