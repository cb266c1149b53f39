//! Request/response and snapshot models exposed to callers.

use serde::{Deserialize, Serialize};

use crate::core::{LotUtilization, ParkingError, RowLabel, StrategyKind, Vehicle};
use crate::service::ParkingService;
use crate::util::types::{AttendantId, LotId, Plate, SpaceId, TicketId, TimestampMs};

/// Where a vehicle was admitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Lot.
    pub lot_id: LotId,
    /// Space within the lot.
    pub space_id: SpaceId,
}

/// Location of a parked vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleLocation {
    /// Plate.
    pub plate: Plate,
    /// Lot.
    pub lot_id: LotId,
    /// Space.
    pub space_id: SpaceId,
    /// Row band of the space.
    pub row: RowLabel,
    /// Arrival time.
    pub parked_at_ms: TimestampMs,
    /// Attendant on the active ticket, if any.
    pub attendant_id: Option<AttendantId>,
}

/// Per-lot occupancy with occupant classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotAnalytics {
    /// Occupancy figures.
    pub utilization: LotUtilization,
    /// Occupants with a handicap permit.
    pub handicap_vehicles: usize,
    /// Large occupants.
    pub large_vehicles: usize,
    /// Small occupants.
    pub small_vehicles: usize,
}

/// Admission request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParkRequest {
    /// Vehicle to admit.
    pub vehicle: Option<Vehicle>,
    /// Attendant handling the admission.
    #[serde(default)]
    pub attendant_id: Option<AttendantId>,
    /// Strategy override; the service default applies when absent.
    #[serde(default)]
    pub strategy: Option<StrategyKind>,
    /// Whether to issue a ticket.
    #[serde(default)]
    pub ticketed: bool,
}

/// Admission outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkResponse {
    /// Lot.
    pub lot_id: LotId,
    /// Space.
    pub space_id: SpaceId,
    /// Attendant who handled the admission.
    pub attendant_id: Option<AttendantId>,
    /// Policy that chose the lot.
    pub reason: String,
    /// Ticket issued, for ticketed admissions.
    pub ticket_id: Option<TicketId>,
}

/// Handle an admission request against a service.
pub fn submit_park_request(
    service: &mut ParkingService,
    req: ParkRequest,
) -> Result<ParkResponse, ParkingError> {
    let vehicle = req.vehicle.ok_or(ParkingError::NilVehicle)?;
    let strategy = req
        .strategy
        .unwrap_or_else(|| service.default_strategy())
        .allocation();
    let attendant_id = req.attendant_id.as_deref();

    if req.ticketed {
        let (ticket, reason) = service.park_ticketed(vehicle, attendant_id, strategy)?;
        return Ok(ParkResponse {
            lot_id: ticket.lot_id,
            space_id: ticket.space_id,
            attendant_id: ticket.attendant_id,
            reason,
            ticket_id: Some(ticket.id),
        });
    }

    if let Some(attendant_id) = attendant_id {
        let decision = service.park_with_strategy(vehicle, attendant_id, strategy)?;
        return Ok(ParkResponse {
            lot_id: decision.lot_id,
            space_id: decision.space_id,
            attendant_id: Some(decision.attendant_id),
            reason: decision.reason,
            ticket_id: None,
        });
    }

    let kind = strategy.map_or(StrategyKind::FirstAvailable, StrategyKind::from);
    let reason = strategy.map_or_else(
        || crate::core::FIRST_AVAILABLE_REASON.to_string(),
        |s| format!("Strategy: {}", s.name()),
    );
    let placement = service.park_using(vehicle, kind)?;
    Ok(ParkResponse {
        lot_id: placement.lot_id,
        space_id: placement.space_id,
        attendant_id: None,
        reason,
        ticket_id: None,
    })
}
