//! Read-only investigative queries over occupied spaces.
//!
//! Nothing here mutates the facility. Text matching on color and make is
//! case-insensitive; an empty string matches anything.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{Lot, ParkingError, RowLabel, Space, Vehicle, VehicleSize};
use crate::service::ParkingService;
use crate::util::clock::format_ms;
use crate::util::types::{AttendantId, LotId, SpaceId, TimestampMs};

/// Filter over parked vehicles. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleQuery {
    color: Option<String>,
    make: Option<String>,
    size: Option<VehicleSize>,
    handicap: Option<bool>,
    rows: Option<Vec<RowLabel>>,
    lot_id: Option<LotId>,
    parked_within: Option<Duration>,
}

impl VehicleQuery {
    /// Match everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Color equals `color`, ignoring case.
    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Make equals `make`, ignoring case.
    #[must_use]
    pub fn make(mut self, make: impl Into<String>) -> Self {
        self.make = Some(make.into());
        self
    }

    /// Size class.
    #[must_use]
    pub const fn size(mut self, size: VehicleSize) -> Self {
        self.size = Some(size);
        self
    }

    /// Handicap flag.
    #[must_use]
    pub const fn handicap(mut self, handicap: bool) -> Self {
        self.handicap = Some(handicap);
        self
    }

    /// Space row is one of `rows`.
    #[must_use]
    pub fn rows(mut self, rows: &[RowLabel]) -> Self {
        self.rows = Some(rows.to_vec());
        self
    }

    /// Parked in `lot_id`.
    #[must_use]
    pub fn in_lot(mut self, lot_id: impl Into<LotId>) -> Self {
        self.lot_id = Some(lot_id.into());
        self
    }

    /// Arrived no earlier than `window` before now.
    #[must_use]
    pub const fn parked_within(mut self, window: Duration) -> Self {
        self.parked_within = Some(window);
        self
    }

    fn matches(&self, lot: &Lot, space: &Space, vehicle: &Vehicle, now_ms: TimestampMs) -> bool {
        let text = |wanted: &Option<String>, actual: &str| {
            wanted
                .as_deref()
                .is_none_or(|w| w.is_empty() || w.eq_ignore_ascii_case(actual))
        };
        text(&self.color, vehicle.color())
            && text(&self.make, vehicle.make())
            && self.size.is_none_or(|s| s == vehicle.size())
            && self.handicap.is_none_or(|h| h == vehicle.is_handicap())
            && self.rows.as_ref().is_none_or(|rows| rows.contains(&space.row()))
            && self.lot_id.as_deref().is_none_or(|id| id == lot.id())
            && self.parked_within.is_none_or(|window| {
                let cutoff = now_ms.saturating_sub(window.as_millis());
                space.occupied_at_ms().is_some_and(|at| at >= cutoff)
            })
    }
}

/// A parked vehicle matching a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleFinding {
    /// The vehicle as currently classified.
    pub vehicle: Vehicle,
    /// Lot.
    pub lot_id: LotId,
    /// Space.
    pub space_id: SpaceId,
    /// Row band.
    pub row: RowLabel,
    /// Arrival time.
    pub parked_at_ms: TimestampMs,
    /// Attendant on the active ticket.
    pub attendant_id: Option<AttendantId>,
    /// That attendant's name, when on the roster.
    pub attendant_name: Option<String>,
}

/// Vehicle counts per row across all lots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationStatistics {
    /// All parked vehicles per row. Every row is present.
    pub vehicles_by_row: BTreeMap<RowLabel, usize>,
    /// Handicap vehicles per row. Every row is present.
    pub handicap_by_row: BTreeMap<RowLabel, usize>,
    /// Parked vehicles in total.
    pub total_vehicles: usize,
}

/// Query layer borrowing a service read-only.
#[derive(Clone, Copy)]
pub struct InvestigationService<'a> {
    service: &'a ParkingService,
}

impl<'a> InvestigationService<'a> {
    /// Investigate `service`.
    pub const fn new(service: &'a ParkingService) -> Self {
        Self { service }
    }

    /// Every parked vehicle matching `query`, in lot then space order.
    pub fn find(&self, query: &VehicleQuery) -> Vec<VehicleFinding> {
        let now = self.service.now_ms();
        self.occupied()
            .filter(|(lot, space, vehicle)| query.matches(lot, space, vehicle, now))
            .map(|(lot, space, vehicle)| self.finding(lot, space, vehicle))
            .collect()
    }

    /// Vehicles of a color and make. Empty strings match anything.
    pub fn by_color_and_make(&self, color: &str, make: &str) -> Vec<VehicleFinding> {
        self.find(&VehicleQuery::new().color(color).make(make))
    }

    /// Every vehicle parked in one lot.
    pub fn in_lot(&self, lot_id: &str) -> Result<Vec<VehicleFinding>, ParkingError> {
        self.service.lot(lot_id)?;
        Ok(self.find(&VehicleQuery::new().in_lot(lot_id)))
    }

    /// Handicap vehicles parked in any of `rows`.
    pub fn handicap_in_rows(&self, rows: &[RowLabel]) -> Vec<VehicleFinding> {
        self.find(&VehicleQuery::new().handicap(true).rows(rows))
    }

    /// Vehicles matching size and handicap flag in any of `rows`.
    pub fn by_location(&self, size: VehicleSize, handicap: bool, rows: &[RowLabel]) -> Vec<VehicleFinding> {
        self.find(&VehicleQuery::new().size(size).handicap(handicap).rows(rows))
    }

    /// Vehicles that arrived within `window` of now.
    pub fn parked_within(&self, window: Duration) -> Vec<VehicleFinding> {
        self.find(&VehicleQuery::new().parked_within(window))
    }

    /// Per-row counts over all lots.
    pub fn location_statistics(&self) -> LocationStatistics {
        let mut stats = LocationStatistics {
            vehicles_by_row: RowLabel::ALL.iter().map(|r| (*r, 0)).collect(),
            handicap_by_row: RowLabel::ALL.iter().map(|r| (*r, 0)).collect(),
            total_vehicles: 0,
        };
        for (_, space, vehicle) in self.occupied() {
            stats.total_vehicles += 1;
            *stats.vehicles_by_row.entry(space.row()).or_default() += 1;
            if vehicle.is_handicap() {
                *stats.handicap_by_row.entry(space.row()).or_default() += 1;
            }
        }
        stats
    }

    /// Plain-text report over a set of findings.
    pub fn investigation_report(&self, findings: &[VehicleFinding], case_type: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== POLICE INVESTIGATION REPORT ===");
        let _ = writeln!(out, "Case Type: {case_type}");
        let _ = writeln!(out, "Generated: {}", format_ms(self.service.now_ms()));
        let _ = writeln!(out, "Total Vehicles Found: {}", findings.len());
        let _ = writeln!(out);
        for (i, f) in findings.iter().enumerate() {
            let _ = writeln!(out, "Vehicle {}:", i + 1);
            let _ = writeln!(out, "  License Plate: {}", f.vehicle.plate());
            let _ = writeln!(out, "  Driver: {}", f.vehicle.owner());
            let _ = writeln!(out, "  Color: {}", f.vehicle.color());
            let _ = writeln!(out, "  Make: {}", f.vehicle.make());
            let _ = writeln!(out, "  Location: Lot {}, Space {}, Row {}", f.lot_id, f.space_id, f.row);
            let _ = writeln!(out, "  Parked At: {}", format_ms(f.parked_at_ms));
            if let Some(id) = &f.attendant_id {
                let _ = writeln!(out, "  Attendant ID: {id}");
                if let Some(name) = &f.attendant_name {
                    let _ = writeln!(out, "  Attendant Name: {name}");
                }
            }
            let _ = writeln!(out);
        }
        out
    }

    fn occupied(&self) -> impl Iterator<Item = (&'a Lot, &'a Space, &'a Vehicle)> + 'a {
        let service = self.service;
        service.lots().iter().flat_map(|lot| {
            lot.spaces()
                .iter()
                .filter_map(move |space| space.occupant().map(|vehicle| (lot, space, vehicle)))
        })
    }

    fn finding(&self, lot: &Lot, space: &Space, vehicle: &Vehicle) -> VehicleFinding {
        let attendant_id = self
            .service
            .tickets()
            .active(vehicle.plate())
            .and_then(|t| t.attendant_id.clone());
        let attendant_name = attendant_id
            .as_deref()
            .and_then(|id| self.service.attendant(id).ok())
            .map(|a| a.name().to_string());
        VehicleFinding {
            vehicle: vehicle.clone(),
            lot_id: lot.id().to_string(),
            space_id: space.id(),
            row: space.row(),
            parked_at_ms: space.occupied_at_ms().unwrap_or_default(),
            attendant_id,
            attendant_name,
        }
    }
}
