//! Vehicle records.

use serde::{Deserialize, Serialize};

use crate::util::types::Plate;

/// Value used for free-text attributes that were never set.
pub const UNKNOWN: &str = "Unknown";

/// Size class used by the large-vehicle allocation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleSize {
    /// Compact cars and motorcycles.
    Small,
    /// Regular cars.
    #[default]
    Medium,
    /// Vans, trucks and anything needing extra clearance.
    Large,
}

/// A vehicle presented for admission.
///
/// The plate is fixed at construction. Classification fields can be changed
/// before or after the vehicle is parked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    plate: Plate,
    owner: String,
    #[serde(default)]
    size: VehicleSize,
    #[serde(default)]
    handicap: bool,
    #[serde(default = "unknown")]
    color: String,
    #[serde(default = "unknown")]
    make: String,
}

fn unknown() -> String {
    UNKNOWN.to_string()
}

impl Vehicle {
    /// Create a medium, non-handicap vehicle of unknown color and make.
    pub fn new(plate: impl Into<Plate>, owner: impl Into<String>) -> Self {
        Self {
            plate: plate.into(),
            owner: owner.into(),
            size: VehicleSize::default(),
            handicap: false,
            color: unknown(),
            make: unknown(),
        }
    }

    /// Builder-style size.
    #[must_use]
    pub fn with_size(mut self, size: VehicleSize) -> Self {
        self.size = size;
        self
    }

    /// Builder-style handicap flag.
    #[must_use]
    pub fn with_handicap(mut self, handicap: bool) -> Self {
        self.handicap = handicap;
        self
    }

    /// Builder-style color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Builder-style make.
    #[must_use]
    pub fn with_make(mut self, make: impl Into<String>) -> Self {
        self.make = make.into();
        self
    }

    /// License plate.
    pub fn plate(&self) -> &str {
        &self.plate
    }

    /// Owner / driver name.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Size class.
    pub const fn size(&self) -> VehicleSize {
        self.size
    }

    /// Whether the vehicle carries a handicap permit.
    pub const fn is_handicap(&self) -> bool {
        self.handicap
    }

    /// Whether the vehicle is in the large size class.
    pub fn is_large(&self) -> bool {
        self.size == VehicleSize::Large
    }

    /// Color as reported at the gate.
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Manufacturer.
    pub fn make(&self) -> &str {
        &self.make
    }

    /// Change the size class.
    pub fn set_size(&mut self, size: VehicleSize) {
        self.size = size;
    }

    /// Change the handicap flag.
    pub fn set_handicap(&mut self, handicap: bool) {
        self.handicap = handicap;
    }

    /// Change the color.
    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    /// Change the make.
    pub fn set_make(&mut self, make: impl Into<String>) {
        self.make = make.into();
    }
}
