//! A single parking space.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::Vehicle;
use crate::util::types::{SpaceId, TimestampMs};

/// Upper space id (inclusive) of each row band, in row order.
///
/// The cutoffs are absolute and do not scale with lot capacity.
pub const ROW_BAND_LIMITS: [SpaceId; 3] = [25, 50, 75];

/// Row label derived from a space id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RowLabel {
    /// Spaces 1..=25.
    A,
    /// Spaces 26..=50.
    B,
    /// Spaces 51..=75.
    C,
    /// Everything above 75.
    D,
}

impl RowLabel {
    /// All rows in ascending order.
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Map a space id onto its row band.
    pub const fn for_space(id: SpaceId) -> Self {
        if id <= ROW_BAND_LIMITS[0] {
            Self::A
        } else if id <= ROW_BAND_LIMITS[1] {
            Self::B
        } else if id <= ROW_BAND_LIMITS[2] {
            Self::C
        } else {
            Self::D
        }
    }

    /// Single-letter label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

impl fmt::Display for RowLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view of a space for location reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceDetails {
    /// Space id.
    pub space_id: SpaceId,
    /// Row band.
    pub row: RowLabel,
    /// Occupancy flag.
    pub occupied: bool,
    /// When the current occupant arrived.
    pub parked_at_ms: Option<TimestampMs>,
}

/// One unit of lot capacity. Holds at most one vehicle.
///
/// Occupancy is carried by the occupant itself, so an empty space can never
/// hold a stale vehicle or timestamp.
#[derive(Debug, Clone)]
pub struct Space {
    id: SpaceId,
    occupant: Option<Occupant>,
}

#[derive(Debug, Clone)]
struct Occupant {
    vehicle: Vehicle,
    since_ms: TimestampMs,
}

impl Space {
    /// Create an empty space.
    pub const fn new(id: SpaceId) -> Self {
        Self { id, occupant: None }
    }

    /// Space id.
    pub const fn id(&self) -> SpaceId {
        self.id
    }

    /// Whether a vehicle is parked here.
    pub const fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Park `vehicle` here.
    ///
    /// A taken space refuses the vehicle and hands it back unchanged.
    pub fn occupy(&mut self, vehicle: Vehicle, now_ms: TimestampMs) -> Result<(), Vehicle> {
        if self.occupant.is_some() {
            return Err(vehicle);
        }
        self.occupant = Some(Occupant {
            vehicle,
            since_ms: now_ms,
        });
        Ok(())
    }

    /// Empty the space, returning whoever was parked.
    pub fn release(&mut self) -> Option<Vehicle> {
        self.occupant.take().map(|o| o.vehicle)
    }

    /// Current occupant.
    pub fn occupant(&self) -> Option<&Vehicle> {
        self.occupant.as_ref().map(|o| &o.vehicle)
    }

    /// Mutable access to the occupant for reclassification.
    pub fn occupant_mut(&mut self) -> Option<&mut Vehicle> {
        self.occupant.as_mut().map(|o| &mut o.vehicle)
    }

    /// Whether this space holds the given plate.
    pub fn holds(&self, plate: &str) -> bool {
        self.occupant().is_some_and(|v| v.plate() == plate)
    }

    /// Start of the current occupation.
    pub fn occupied_at_ms(&self) -> Option<TimestampMs> {
        self.occupant.as_ref().map(|o| o.since_ms)
    }

    /// Row band of this space.
    pub const fn row(&self) -> RowLabel {
        RowLabel::for_space(self.id)
    }

    /// Location summary.
    pub fn details(&self) -> SpaceDetails {
        SpaceDetails {
            space_id: self.id,
            row: self.row(),
            occupied: self.is_occupied(),
            parked_at_ms: self.occupied_at_ms(),
        }
    }
}
