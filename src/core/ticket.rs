//! Tickets and the per-facility ticket store.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::ParkingError;
use crate::util::clock::elapsed;
use crate::util::types::{AttendantId, LotId, Plate, SpaceId, TicketId, TimestampMs};

/// Record of one stay, from admission to exit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique id.
    pub id: TicketId,
    /// Plate of the parked vehicle.
    pub plate: Plate,
    /// Lot the vehicle was admitted to.
    pub lot_id: LotId,
    /// Space the vehicle was admitted to.
    pub space_id: SpaceId,
    /// Admission time.
    pub start_ms: TimestampMs,
    /// Exit time, absent while active.
    pub end_ms: Option<TimestampMs>,
    /// Whether the stay is ongoing.
    pub active: bool,
    /// Attendant who handled the admission.
    pub attendant_id: Option<AttendantId>,
}

impl Ticket {
    /// Length of the stay. Active tickets measure up to `now_ms`.
    pub fn duration(&self, now_ms: TimestampMs) -> Duration {
        elapsed(self.start_ms, self.end_ms.unwrap_or(now_ms))
    }

    fn close(&mut self, now_ms: TimestampMs) -> Result<(), ParkingError> {
        if !self.active {
            return Err(ParkingError::TicketAlreadyClosed(self.id.clone()));
        }
        self.active = false;
        self.end_ms = Some(now_ms);
        Ok(())
    }
}

/// Every ticket issued by one facility, with a plate index of active tickets.
///
/// At most one ticket per plate is active. Opening a ticket for a plate that
/// still holds an active one closes the older ticket first.
#[derive(Debug, Default)]
pub struct TicketStore {
    tickets: HashMap<TicketId, Ticket>,
    order: Vec<TicketId>,
    active_by_plate: HashMap<Plate, TicketId>,
}

impl TicketStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue an active ticket starting at `now_ms`.
    pub fn open(
        &mut self,
        plate: &str,
        lot_id: &str,
        space_id: SpaceId,
        attendant_id: Option<AttendantId>,
        now_ms: TimestampMs,
    ) -> &Ticket {
        if let Some(previous) = self.active_by_plate.remove(plate) {
            if let Some(ticket) = self.tickets.get_mut(&previous) {
                tracing::warn!(plate, ticket = %previous, "superseding active ticket");
                let closed = ticket.close(now_ms);
                debug_assert!(closed.is_ok(), "active index pointed at closed ticket {previous}");
            }
        }

        let id = self.unique_id(plate, lot_id, space_id, now_ms);
        let ticket = Ticket {
            id: id.clone(),
            plate: plate.to_string(),
            lot_id: lot_id.to_string(),
            space_id,
            start_ms: now_ms,
            end_ms: None,
            active: true,
            attendant_id,
        };
        tracing::debug!(ticket = %id, plate, lot = lot_id, space = space_id, "ticket opened");
        self.order.push(id.clone());
        self.active_by_plate.insert(plate.to_string(), id.clone());
        self.tickets.entry(id).or_insert(ticket)
    }

    /// Close a ticket by id. A second close is rejected.
    pub fn close(&mut self, ticket_id: &str, now_ms: TimestampMs) -> Result<&Ticket, ParkingError> {
        let ticket = self
            .tickets
            .get_mut(ticket_id)
            .ok_or_else(|| ParkingError::TicketNotFound(ticket_id.to_string()))?;
        ticket.close(now_ms)?;
        if self.active_by_plate.get(&ticket.plate).is_some_and(|id| id == ticket_id) {
            self.active_by_plate.remove(&ticket.plate);
        }
        tracing::debug!(ticket = ticket_id, "ticket closed");
        Ok(ticket)
    }

    /// Close the active ticket of `plate`.
    pub fn close_active(&mut self, plate: &str, now_ms: TimestampMs) -> Result<&Ticket, ParkingError> {
        let id = self
            .active_by_plate
            .get(plate)
            .cloned()
            .ok_or_else(|| ParkingError::NoActiveTicket(plate.to_string()))?;
        self.close(&id, now_ms)
    }

    /// Active ticket of `plate`.
    pub fn active(&self, plate: &str) -> Option<&Ticket> {
        self.active_by_plate.get(plate).and_then(|id| self.tickets.get(id))
    }

    /// Ticket by id.
    pub fn get(&self, ticket_id: &str) -> Option<&Ticket> {
        self.tickets.get(ticket_id)
    }

    /// Every ticket of `plate`, oldest first.
    pub fn history(&self, plate: &str) -> Vec<&Ticket> {
        self.iter().filter(|t| t.plate == plate).collect()
    }

    /// All tickets in issue order.
    pub fn iter(&self) -> impl Iterator<Item = &Ticket> + '_ {
        self.order.iter().filter_map(|id| self.tickets.get(id))
    }

    /// Number of tickets issued.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no ticket was ever issued.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn unique_id(&self, plate: &str, lot_id: &str, space_id: SpaceId, now_ms: TimestampMs) -> TicketId {
        let base = format!("{plate}_{lot_id}_{space_id}_{now_ms}");
        if !self.tickets.contains_key(&base) {
            return base;
        }
        (1u64..)
            .map(|n| format!("{base}_{n}"))
            .find(|candidate| !self.tickets.contains_key(candidate))
            .unwrap_or(base)
    }
}
