//! Fixed-capacity parking lot with edge-triggered capacity notifications.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::observer::{LotObserver, LotTransition, ObserverHandle, ObserverRegistry};
use crate::core::{ParkingError, Space, Vehicle};
use crate::util::types::{LotId, SpaceId, TimestampMs};

/// Occupancy statistics for one lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotUtilization {
    /// Lot id.
    pub lot_id: LotId,
    /// Capacity.
    pub total_spaces: usize,
    /// Occupied spaces.
    pub occupied_spaces: usize,
    /// Free spaces.
    pub available_spaces: usize,
    /// Occupied share in percent (0 for an empty-capacity lot).
    pub utilization_rate: f64,
    /// Whether the lot is full.
    pub is_full: bool,
}

/// An ordered, fixed collection of spaces numbered `1..=capacity`.
///
/// `occupied` is maintained incrementally and always equals the number of
/// occupied spaces; every mutation goes through [`Lot::occupy`],
/// [`Lot::try_admit`] or [`Lot::release`].
#[derive(Debug)]
pub struct Lot {
    id: LotId,
    spaces: Vec<Space>,
    occupied: usize,
    observers: ObserverRegistry,
}

impl Lot {
    /// Create a lot with `capacity` empty spaces.
    pub fn new(id: impl Into<LotId>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            spaces: (1..=capacity).map(Space::new).collect(),
            occupied: 0,
            observers: ObserverRegistry::default(),
        }
    }

    /// Lot id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Number of spaces.
    pub fn capacity(&self) -> usize {
        self.spaces.len()
    }

    /// Spaces in ascending id order.
    pub fn spaces(&self) -> &[Space] {
        &self.spaces
    }

    /// Look up a space by id.
    pub fn space(&self, id: SpaceId) -> Option<&Space> {
        self.spaces.iter().find(|s| s.id() == id)
    }

    /// Occupied spaces.
    pub const fn occupied_count(&self) -> usize {
        self.occupied
    }

    /// Free spaces.
    pub fn available_count(&self) -> usize {
        self.capacity() - self.occupied
    }

    /// Whether every space is taken.
    pub fn is_full(&self) -> bool {
        self.occupied == self.capacity()
    }

    /// First free space in ascending id order.
    pub fn find_available_space(&self) -> Option<&Space> {
        self.spaces.iter().find(|s| !s.is_occupied())
    }

    /// Space currently holding `plate`.
    pub fn find_occupant_space(&self, plate: &str) -> Option<&Space> {
        self.spaces.iter().find(|s| s.holds(plate))
    }

    /// Mutable occupant lookup, for reclassifying a parked vehicle.
    pub fn occupant_mut(&mut self, plate: &str) -> Option<&mut Vehicle> {
        self.spaces
            .iter_mut()
            .find(|s| s.holds(plate))
            .and_then(Space::occupant_mut)
    }

    /// Park in the first free space.
    ///
    /// A full lot returns [`ParkingError::LotFull`]; the vehicle is dropped, so
    /// callers that want to retry elsewhere check [`Lot::is_full`] first.
    pub fn try_admit(&mut self, vehicle: Vehicle, now_ms: TimestampMs) -> Result<SpaceId, ParkingError> {
        let Some(space_id) = self.find_available_space().map(Space::id) else {
            tracing::debug!(lot = %self.id, plate = vehicle.plate(), "admission refused, lot full");
            return Err(ParkingError::LotFull(self.id.clone()));
        };
        self.occupy(space_id, vehicle, now_ms)?;
        Ok(space_id)
    }

    /// Park in a specific space, as proposed by an attendant decision.
    pub fn occupy(
        &mut self,
        space_id: SpaceId,
        vehicle: Vehicle,
        now_ms: TimestampMs,
    ) -> Result<(), ParkingError> {
        let plate = vehicle.plate().to_string();
        let accepted = self
            .spaces
            .iter_mut()
            .find(|s| s.id() == space_id)
            .is_some_and(|space| space.occupy(vehicle, now_ms).is_ok());
        if !accepted {
            return Err(ParkingError::SpaceUnavailable {
                lot_id: self.id.clone(),
                space_id,
            });
        }
        self.occupied += 1;
        tracing::debug!(lot = %self.id, space = space_id, plate = %plate, "vehicle admitted");
        if self.is_full() {
            self.emit(LotTransition::Full);
        }
        Ok(())
    }

    /// Remove the vehicle with `plate`.
    pub fn release(&mut self, plate: &str) -> Result<Vehicle, ParkingError> {
        let was_full = self.is_full();
        let vehicle = self
            .spaces
            .iter_mut()
            .find(|s| s.holds(plate))
            .and_then(Space::release)
            .ok_or_else(|| ParkingError::CarNotFound(plate.to_string()))?;
        self.occupied -= 1;
        tracing::debug!(lot = %self.id, plate, "vehicle released");
        if was_full {
            self.emit(LotTransition::Available);
        }
        Ok(vehicle)
    }

    /// Register an observer. Observers are notified in registration order.
    pub fn add_observer(&mut self, observer: Arc<dyn LotObserver>) -> ObserverHandle {
        self.observers.register(observer)
    }

    /// Unregister an observer. Returns false if the handle was unknown.
    pub fn remove_observer(&mut self, handle: ObserverHandle) -> bool {
        self.observers.remove(handle)
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Occupancy statistics.
    #[allow(clippy::cast_precision_loss)]
    pub fn utilization(&self) -> LotUtilization {
        let total = self.capacity();
        let utilization_rate = if total == 0 {
            0.0
        } else {
            self.occupied as f64 / total as f64 * 100.0
        };
        LotUtilization {
            lot_id: self.id.clone(),
            total_spaces: total,
            occupied_spaces: self.occupied,
            available_spaces: self.available_count(),
            utilization_rate,
            is_full: self.is_full(),
        }
    }

    fn emit(&self, transition: LotTransition) {
        match transition {
            LotTransition::Full => tracing::info!(lot = %self.id, "lot is now full"),
            LotTransition::Available => tracing::info!(lot = %self.id, "lot has space available"),
        }
        self.observers.notify(&self.id, transition);
    }
}
