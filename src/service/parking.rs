//! Service facade orchestrating lots, attendants, strategies and tickets.

use std::sync::Arc;

use crate::core::{
    build_audit_event, AllocationStrategy, Attendant, AuditAction, AuditSink, Bill, Decision, Lot,
    LotObserver, LotUtilization, ObserverHandle, ParkingError, RateConfig, Space, StrategyKind, Ticket,
    TicketStore, Vehicle, VehicleSize, FIRST_AVAILABLE_REASON,
};
use crate::service::api::{LotAnalytics, Placement, VehicleLocation};
use crate::util::clock::{format_ms, Clock, SystemClock};
use crate::util::types::{AttendantId, LotId, SpaceId, TimestampMs};

/// Outcome of a placement before it is shaped for a particular caller.
struct Admission {
    placement: Placement,
    attendant_id: Option<AttendantId>,
    reason: String,
}

/// Owns the facility: lots in allocation order, the attendant roster and
/// the ticket store.
///
/// Every operation checks its preconditions before touching any lot, so an
/// error never leaves partial state behind.
pub struct ParkingService {
    lots: Vec<Lot>,
    attendants: Vec<Attendant>,
    tickets: TicketStore,
    default_strategy: StrategyKind,
    rates: RateConfig,
    clock: Arc<dyn Clock>,
    audit: Option<Box<dyn AuditSink>>,
}

impl Default for ParkingService {
    fn default() -> Self {
        Self::new()
    }
}

impl ParkingService {
    /// Empty facility on the system clock with the default tariff.
    pub fn new() -> Self {
        Self {
            lots: Vec::new(),
            attendants: Vec::new(),
            tickets: TicketStore::new(),
            default_strategy: StrategyKind::default(),
            rates: RateConfig::default(),
            clock: Arc::new(SystemClock),
            audit: None,
        }
    }

    /// Replace the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Attach an audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: Box<dyn AuditSink>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Replace the tariff.
    #[must_use]
    pub fn with_rates(mut self, rates: RateConfig) -> Self {
        self.rates = rates;
        self
    }

    /// Replace the strategy applied to requests that do not name one.
    #[must_use]
    pub fn with_default_strategy(mut self, strategy: StrategyKind) -> Self {
        self.default_strategy = strategy;
        self
    }

    /// Current time according to the service clock.
    pub fn now_ms(&self) -> TimestampMs {
        self.clock.now_ms()
    }

    // ----- lots and observers -------------------------------------------

    /// Register a lot. Lots are tried in registration order.
    pub fn add_lot(&mut self, lot: Lot) -> Result<(), ParkingError> {
        if self.lots.iter().any(|l| l.id() == lot.id()) {
            return Err(ParkingError::DuplicateLot(lot.id().to_string()));
        }
        tracing::debug!(lot = lot.id(), capacity = lot.capacity(), "lot added");
        self.lots.push(lot);
        Ok(())
    }

    /// Lot by id.
    pub fn lot(&self, lot_id: &str) -> Result<&Lot, ParkingError> {
        self.lots
            .iter()
            .find(|l| l.id() == lot_id)
            .ok_or_else(|| ParkingError::LotNotFound(lot_id.to_string()))
    }

    /// All lots in allocation order.
    pub fn lots(&self) -> &[Lot] {
        &self.lots
    }

    /// Subscribe an observer to a lot's capacity transitions.
    pub fn add_observer_to_lot(
        &mut self,
        lot_id: &str,
        observer: Arc<dyn LotObserver>,
    ) -> Result<ObserverHandle, ParkingError> {
        let index = self.lot_index(lot_id)?;
        Ok(self.lots[index].add_observer(observer))
    }

    /// Unsubscribe an observer. `Ok(false)` if the handle was not registered.
    pub fn remove_observer_from_lot(
        &mut self,
        lot_id: &str,
        handle: ObserverHandle,
    ) -> Result<bool, ParkingError> {
        let index = self.lot_index(lot_id)?;
        Ok(self.lots[index].remove_observer(handle))
    }

    /// Whether any lot is full.
    pub fn is_any_lot_full(&self) -> bool {
        self.lots.iter().any(Lot::is_full)
    }

    /// Occupancy statistics per lot.
    pub fn lot_utilization(&self) -> Vec<LotUtilization> {
        self.lots.iter().map(Lot::utilization).collect()
    }

    /// Occupancy plus occupant classification per lot.
    pub fn lot_analytics(&self) -> Vec<LotAnalytics> {
        self.lots
            .iter()
            .map(|lot| {
                let mut analytics = LotAnalytics {
                    utilization: lot.utilization(),
                    handicap_vehicles: 0,
                    large_vehicles: 0,
                    small_vehicles: 0,
                };
                for vehicle in lot.spaces().iter().filter_map(Space::occupant) {
                    if vehicle.is_handicap() {
                        analytics.handicap_vehicles += 1;
                    }
                    match vehicle.size() {
                        VehicleSize::Small => analytics.small_vehicles += 1,
                        VehicleSize::Large => analytics.large_vehicles += 1,
                        VehicleSize::Medium => {}
                    }
                }
                analytics
            })
            .collect()
    }

    /// Lot a large vehicle would be sent to, with its free count.
    pub fn best_lot_for_large_vehicle(&self) -> Result<(LotId, usize), ParkingError> {
        let probe = Vehicle::new("", "").with_size(VehicleSize::Large);
        let lot = AllocationStrategy::LargeVehicle.select_lot(&self.lots, &probe)?;
        Ok((lot.id().to_string(), lot.available_count()))
    }

    // ----- attendants ----------------------------------------------------

    /// Add an attendant to the roster.
    pub fn add_attendant(&mut self, attendant: Attendant) -> Result<(), ParkingError> {
        if self.attendants.iter().any(|a| a.id() == attendant.id()) {
            return Err(ParkingError::DuplicateAttendant(attendant.id().to_string()));
        }
        self.attendants.push(attendant);
        Ok(())
    }

    /// Attendant by id.
    pub fn attendant(&self, attendant_id: &str) -> Result<&Attendant, ParkingError> {
        self.attendants
            .iter()
            .find(|a| a.id() == attendant_id)
            .ok_or_else(|| ParkingError::AttendantNotFound(attendant_id.to_string()))
    }

    /// Mutable attendant by id, e.g. to change duty status.
    pub fn attendant_mut(&mut self, attendant_id: &str) -> Result<&mut Attendant, ParkingError> {
        self.attendants
            .iter_mut()
            .find(|a| a.id() == attendant_id)
            .ok_or_else(|| ParkingError::AttendantNotFound(attendant_id.to_string()))
    }

    /// The roster.
    pub fn attendants(&self) -> &[Attendant] {
        &self.attendants
    }

    // ----- configuration -------------------------------------------------

    /// Strategy applied to requests that do not name one.
    pub const fn default_strategy(&self) -> StrategyKind {
        self.default_strategy
    }

    /// Change the strategy applied to requests that do not name one.
    pub fn set_default_strategy(&mut self, strategy: StrategyKind) {
        self.default_strategy = strategy;
    }

    /// Tariff applied at ticketed exits.
    pub const fn rates(&self) -> &RateConfig {
        &self.rates
    }

    /// Change the tariff.
    pub fn set_rates(&mut self, rates: RateConfig) {
        self.rates = rates;
    }

    // ----- admission -----------------------------------------------------

    /// Park in the first lot with room.
    pub fn park(&mut self, vehicle: Vehicle) -> Result<Placement, ParkingError> {
        self.place(vehicle, None, None).map(|a| a.placement)
    }

    /// Park using a strategy selection, without an attendant.
    pub fn park_using(&mut self, vehicle: Vehicle, strategy: StrategyKind) -> Result<Placement, ParkingError> {
        self.place(vehicle, None, strategy.allocation()).map(|a| a.placement)
    }

    /// Park through an attendant using the first-available policy.
    pub fn park_with_attendant(&mut self, vehicle: Vehicle, attendant_id: &str) -> Result<Decision, ParkingError> {
        self.park_with_strategy(vehicle, attendant_id, None)
    }

    /// Park through an attendant. `None` falls back to first-available.
    pub fn park_with_strategy(
        &mut self,
        vehicle: Vehicle,
        attendant_id: &str,
        strategy: Option<AllocationStrategy>,
    ) -> Result<Decision, ParkingError> {
        let admission = self.place(vehicle, Some(attendant_id), strategy)?;
        Ok(Decision {
            attendant_id: admission.attendant_id.unwrap_or_else(|| attendant_id.to_string()),
            lot_id: admission.placement.lot_id,
            space_id: admission.placement.space_id,
            reason: admission.reason,
        })
    }

    /// Park through an attendant with even distribution.
    pub fn park_even_distribution(&mut self, vehicle: Vehicle, attendant_id: &str) -> Result<Decision, ParkingError> {
        self.park_with_strategy(vehicle, attendant_id, Some(AllocationStrategy::EvenDistribution))
    }

    /// Handicap entry path. Vehicles without a permit are turned away.
    pub fn park_handicap(&mut self, vehicle: Vehicle, attendant_id: &str) -> Result<Decision, ParkingError> {
        if !vehicle.is_handicap() {
            return Err(ParkingError::CarNotHandicapForHandicapStrategy(vehicle.plate().to_string()));
        }
        self.park_with_strategy(vehicle, attendant_id, Some(AllocationStrategy::HandicapPriority))
    }

    /// Large-vehicle entry path. Smaller vehicles are turned away.
    pub fn park_large_vehicle(&mut self, vehicle: Vehicle, attendant_id: &str) -> Result<Decision, ParkingError> {
        if !vehicle.is_large() {
            return Err(ParkingError::CarNotLargeForLargeStrategy(vehicle.plate().to_string()));
        }
        self.park_with_strategy(vehicle, attendant_id, Some(AllocationStrategy::LargeVehicle))
    }

    /// Park through an attendant with the composite strategy.
    pub fn park_smart(&mut self, vehicle: Vehicle, attendant_id: &str) -> Result<Decision, ParkingError> {
        self.park_with_strategy(vehicle, attendant_id, Some(AllocationStrategy::Smart))
    }

    /// Ticketed entry: park in the first lot with room and open a ticket.
    pub fn park_with_ticket(&mut self, vehicle: Vehicle, attendant_id: Option<&str>) -> Result<Ticket, ParkingError> {
        self.park_ticketed(vehicle, attendant_id, None)
            .map(|(ticket, _)| ticket)
    }

    pub(crate) fn park_ticketed(
        &mut self,
        vehicle: Vehicle,
        attendant_id: Option<&str>,
        strategy: Option<AllocationStrategy>,
    ) -> Result<(Ticket, String), ParkingError> {
        let plate = vehicle.plate().to_string();
        let admission = self.place(vehicle, attendant_id, strategy)?;
        let now = self.clock.now_ms();
        let ticket = self
            .tickets
            .open(
                &plate,
                &admission.placement.lot_id,
                admission.placement.space_id,
                admission.attendant_id,
                now,
            )
            .clone();
        self.record(
            AuditAction::TicketOpened,
            &ticket.lot_id,
            Some(ticket.space_id),
            Some(&plate),
            Some(ticket.id.clone()),
        );
        Ok((ticket, admission.reason))
    }

    // ----- exit ----------------------------------------------------------

    /// Remove a vehicle. Any active ticket for the plate is closed.
    pub fn unpark(&mut self, plate: &str) -> Result<Vehicle, ParkingError> {
        if plate.is_empty() {
            return Err(ParkingError::EmptyPlate);
        }
        let (vehicle, _) = self.release(plate)?;
        if self.tickets.active(plate).is_some() {
            self.close_ticket(plate)?;
        }
        Ok(vehicle)
    }

    /// Remove a ticketed vehicle, close its ticket and bill the stay.
    pub fn unpark_with_billing(&mut self, plate: &str) -> Result<(Vehicle, Bill), ParkingError> {
        if plate.is_empty() {
            return Err(ParkingError::EmptyPlate);
        }
        if self.tickets.active(plate).is_none() {
            return Err(ParkingError::NoActiveTicket(plate.to_string()));
        }
        let (vehicle, _) = self.release(plate)?;
        let ticket = self.close_ticket(plate)?;
        let bill = Bill::generate(&ticket, &self.rates, self.clock.now_ms());
        tracing::info!(plate, ticket = %bill.ticket_id, total = %bill.total, "stay billed");
        Ok((vehicle, bill))
    }

    // ----- lookups -------------------------------------------------------

    /// Where a vehicle is parked.
    pub fn find_vehicle(&self, plate: &str) -> Result<VehicleLocation, ParkingError> {
        if plate.is_empty() {
            return Err(ParkingError::EmptyPlate);
        }
        self.lots
            .iter()
            .find_map(|lot| lot.find_occupant_space(plate).map(|space| (lot, space)))
            .map(|(lot, space)| VehicleLocation {
                plate: plate.to_string(),
                lot_id: lot.id().to_string(),
                space_id: space.id(),
                row: space.row(),
                parked_at_ms: space.occupied_at_ms().unwrap_or_default(),
                attendant_id: self.tickets.active(plate).and_then(|t| t.attendant_id.clone()),
            })
            .ok_or_else(|| ParkingError::CarNotFound(plate.to_string()))
    }

    /// Directions to a parked vehicle, for the driver.
    pub fn directions(&self, plate: &str) -> Result<String, ParkingError> {
        let location = self.find_vehicle(plate)?;
        Ok(format!(
            "Your car {} is located in:\n  Lot: {}\n  Space: {}\n  Row: {}\n  Parked at: {}",
            location.plate,
            location.lot_id,
            location.space_id,
            location.row,
            format_ms(location.parked_at_ms),
        ))
    }

    /// Change a parked vehicle's classification in place.
    pub fn reclassify(&mut self, plate: &str, update: impl FnOnce(&mut Vehicle)) -> Result<(), ParkingError> {
        let vehicle = self
            .lots
            .iter_mut()
            .find_map(|lot| lot.occupant_mut(plate))
            .ok_or_else(|| ParkingError::CarNotFound(plate.to_string()))?;
        update(vehicle);
        Ok(())
    }

    /// The ticket store.
    pub const fn tickets(&self) -> &TicketStore {
        &self.tickets
    }

    /// Active ticket of a plate.
    pub fn active_ticket(&self, plate: &str) -> Result<&Ticket, ParkingError> {
        self.tickets
            .active(plate)
            .ok_or_else(|| ParkingError::NoActiveTicket(plate.to_string()))
    }

    /// Every ticket ever issued to a plate, oldest first.
    pub fn parking_history(&self, plate: &str) -> Vec<&Ticket> {
        self.tickets.history(plate)
    }

    /// Bill a ticket as of now. Active tickets yield a running total.
    pub fn bill_for(&self, ticket_id: &str) -> Result<Bill, ParkingError> {
        let ticket = self
            .tickets
            .get(ticket_id)
            .ok_or_else(|| ParkingError::TicketNotFound(ticket_id.to_string()))?;
        Ok(Bill::generate(ticket, &self.rates, self.clock.now_ms()))
    }

    // ----- internals -----------------------------------------------------

    fn lot_index(&self, lot_id: &str) -> Result<usize, ParkingError> {
        self.lots
            .iter()
            .position(|l| l.id() == lot_id)
            .ok_or_else(|| ParkingError::LotNotFound(lot_id.to_string()))
    }

    fn validate_vehicle(&self, vehicle: &Vehicle) -> Result<(), ParkingError> {
        if vehicle.plate().is_empty() {
            return Err(ParkingError::EmptyPlate);
        }
        if self.lots.iter().any(|lot| lot.find_occupant_space(vehicle.plate()).is_some()) {
            return Err(ParkingError::AlreadyParked(vehicle.plate().to_string()));
        }
        Ok(())
    }

    /// Choose a lot (and, with an attendant, a space) and admit the vehicle.
    fn place(
        &mut self,
        vehicle: Vehicle,
        attendant_id: Option<&str>,
        strategy: Option<AllocationStrategy>,
    ) -> Result<Admission, ParkingError> {
        self.validate_vehicle(&vehicle)?;

        if let Some(attendant_id) = attendant_id {
            let decision = self
                .attendant(attendant_id)?
                .make_decision(&self.lots, &vehicle, strategy)?;
            let index = self.lot_index(&decision.lot_id)?;
            let placement = self.admit(index, Some(decision.space_id), vehicle)?;
            return Ok(Admission {
                placement,
                attendant_id: Some(decision.attendant_id),
                reason: decision.reason,
            });
        }

        let (index, reason) = match strategy {
            Some(strategy) => (
                strategy.select_index(&self.lots, &vehicle)?,
                format!("Strategy: {}", strategy.name()),
            ),
            None => (
                self.lots
                    .iter()
                    .position(|lot| !lot.is_full())
                    .ok_or(ParkingError::NoLotAvailable)?,
                FIRST_AVAILABLE_REASON.to_string(),
            ),
        };
        let placement = self.admit(index, None, vehicle)?;
        Ok(Admission {
            placement,
            attendant_id: None,
            reason,
        })
    }

    fn admit(
        &mut self,
        index: usize,
        space_id: Option<SpaceId>,
        vehicle: Vehicle,
    ) -> Result<Placement, ParkingError> {
        let now = self.clock.now_ms();
        let plate = vehicle.plate().to_string();
        let lot = &mut self.lots[index];
        let was_full = lot.is_full();
        let space_id = match space_id {
            Some(space_id) => {
                lot.occupy(space_id, vehicle, now)?;
                space_id
            }
            None => lot.try_admit(vehicle, now)?,
        };
        let became_full = !was_full && lot.is_full();
        let placement = Placement {
            lot_id: lot.id().to_string(),
            space_id,
        };

        self.record(AuditAction::Admit, &placement.lot_id, Some(space_id), Some(&plate), None);
        if became_full {
            self.record(AuditAction::LotFull, &placement.lot_id, None, None, None);
        }
        Ok(placement)
    }

    fn release(&mut self, plate: &str) -> Result<(Vehicle, Placement), ParkingError> {
        let (index, space_id) = self
            .lots
            .iter()
            .enumerate()
            .find_map(|(i, lot)| lot.find_occupant_space(plate).map(|s| (i, s.id())))
            .ok_or_else(|| {
                tracing::debug!(plate, "release refused, car not found");
                ParkingError::CarNotFound(plate.to_string())
            })?;
        let lot = &mut self.lots[index];
        let was_full = lot.is_full();
        let vehicle = lot.release(plate)?;
        let placement = Placement {
            lot_id: lot.id().to_string(),
            space_id,
        };

        self.record(AuditAction::Release, &placement.lot_id, Some(space_id), Some(plate), None);
        if was_full {
            self.record(AuditAction::LotAvailable, &placement.lot_id, None, None, None);
        }
        Ok((vehicle, placement))
    }

    fn close_ticket(&mut self, plate: &str) -> Result<Ticket, ParkingError> {
        let now = self.clock.now_ms();
        let ticket = self.tickets.close_active(plate, now)?.clone();
        self.record(
            AuditAction::TicketClosed,
            &ticket.lot_id,
            Some(ticket.space_id),
            Some(plate),
            Some(ticket.id.clone()),
        );
        Ok(ticket)
    }

    fn record(
        &mut self,
        action: AuditAction,
        lot_id: &str,
        space_id: Option<SpaceId>,
        plate: Option<&str>,
        detail: Option<String>,
    ) {
        let now = self.clock.now_ms();
        if let Some(sink) = self.audit.as_mut() {
            sink.record(build_audit_event(action, lot_id, space_id, plate, detail, now));
        }
    }
}
