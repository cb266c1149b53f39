//! Thread-safe handle around a [`ParkingService`].
//!
//! Admission is a scan-then-mutate sequence and the ticket store keeps a
//! one-active-ticket-per-plate index, so every call takes the one facility
//! lock for its whole duration. Calls are short and never block on I/O.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::{AllocationStrategy, Bill, Decision, LotUtilization, ParkingError, Ticket, Vehicle};
use crate::service::ParkingService;

/// Cloneable, `Send + Sync` facade handle.
#[derive(Clone)]
pub struct SharedParkingService {
    inner: Arc<Mutex<ParkingService>>,
}

impl SharedParkingService {
    /// Wrap a service.
    pub fn new(service: ParkingService) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    /// Run `f` with exclusive access.
    pub fn with<R>(&self, f: impl FnOnce(&mut ParkingService) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut *guard)
    }

    /// Ticketed entry.
    pub fn park_with_ticket(&self, vehicle: Vehicle, attendant_id: Option<&str>) -> Result<Ticket, ParkingError> {
        self.with(|svc| svc.park_with_ticket(vehicle, attendant_id))
    }

    /// Attendant entry with an optional strategy.
    pub fn park_with_strategy(
        &self,
        vehicle: Vehicle,
        attendant_id: &str,
        strategy: Option<AllocationStrategy>,
    ) -> Result<Decision, ParkingError> {
        self.with(|svc| svc.park_with_strategy(vehicle, attendant_id, strategy))
    }

    /// Plain exit.
    pub fn unpark(&self, plate: &str) -> Result<Vehicle, ParkingError> {
        self.with(|svc| svc.unpark(plate))
    }

    /// Ticketed exit with billing.
    pub fn unpark_with_billing(&self, plate: &str) -> Result<(Vehicle, Bill), ParkingError> {
        self.with(|svc| svc.unpark_with_billing(plate))
    }

    /// Occupancy snapshot.
    pub fn lot_utilization(&self) -> Vec<LotUtilization> {
        self.with(|svc| svc.lot_utilization())
    }
}
