//! Lot allocation strategies.
//!
//! Strategies are pure selection functions: given the facility's lots in
//! order and a vehicle, they name one non-full lot or fail with
//! [`ParkingError::NoLotAvailable`]. They never mutate, so a failed selection
//! can be retried freely.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{Lot, ParkingError, Vehicle};

/// Closed set of allocation policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStrategy {
    /// Lot with the most free spaces; ties go to the earliest lot.
    EvenDistribution,
    /// Handicap vehicles take the first non-full lot; others distribute evenly.
    HandicapPriority,
    /// Large vehicles take the roomiest lot; others distribute evenly.
    LargeVehicle,
    /// Handicap rule, then large-vehicle rule, then even distribution.
    Smart,
}

impl AllocationStrategy {
    /// Human-readable name, used in decision reasons.
    pub const fn name(self) -> &'static str {
        match self {
            Self::EvenDistribution => "Even Distribution Strategy",
            Self::HandicapPriority => "Handicap Priority Strategy",
            Self::LargeVehicle => "Large Vehicle Strategy",
            Self::Smart => "Smart Parking Strategy",
        }
    }

    /// Index into `lots` of the selected lot.
    pub fn select_index(self, lots: &[Lot], vehicle: &Vehicle) -> Result<usize, ParkingError> {
        let selected = match self {
            Self::EvenDistribution => most_available(lots),
            Self::HandicapPriority => {
                if vehicle.is_handicap() {
                    first_available(lots)
                } else {
                    most_available(lots)
                }
            }
            Self::LargeVehicle => {
                if vehicle.is_large() {
                    roomiest_for_large(lots)
                } else {
                    most_available(lots)
                }
            }
            // Handicap takes precedence over size.
            Self::Smart => {
                if vehicle.is_handicap() {
                    first_available(lots)
                } else if vehicle.is_large() {
                    roomiest_for_large(lots)
                } else {
                    most_available(lots)
                }
            }
        };
        match selected {
            Some(index) if !lots[index].is_full() => {
                tracing::trace!(
                    strategy = self.name(),
                    lot = lots[index].id(),
                    plate = vehicle.plate(),
                    "lot selected"
                );
                Ok(index)
            }
            _ => Err(ParkingError::NoLotAvailable),
        }
    }

    /// The selected lot itself.
    pub fn select_lot<'a>(self, lots: &'a [Lot], vehicle: &Vehicle) -> Result<&'a Lot, ParkingError> {
        self.select_index(lots, vehicle).map(|i| &lots[i])
    }
}

impl fmt::Display for AllocationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Non-full lot with the strictly greatest free count, first wins ties.
fn most_available(lots: &[Lot]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (index, lot) in lots.iter().enumerate() {
        if lot.is_full() {
            continue;
        }
        let available = lot.available_count();
        if best.is_none_or(|(_, max)| available > max) {
            best = Some((index, available));
        }
    }
    best.map(|(index, _)| index)
}

/// First non-full lot in input order.
fn first_available(lots: &[Lot]) -> Option<usize> {
    lots.iter().position(|lot| !lot.is_full())
}

/// Large-vehicle placement. Shares the even-distribution metric for now;
/// kept separate so clearance rules can be added without touching the others.
fn roomiest_for_large(lots: &[Lot]) -> Option<usize> {
    most_available(lots)
}

/// Strategy selection as it appears in configuration and requests.
///
/// `FirstAvailable` is the attendant's plain policy (first lot with room,
/// first free space) and has no [`AllocationStrategy`] counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// First lot with room, in lot order.
    FirstAvailable,
    /// [`AllocationStrategy::EvenDistribution`].
    #[default]
    EvenDistribution,
    /// [`AllocationStrategy::HandicapPriority`].
    HandicapPriority,
    /// [`AllocationStrategy::LargeVehicle`].
    LargeVehicle,
    /// [`AllocationStrategy::Smart`].
    Smart,
}

impl StrategyKind {
    /// Strategy to hand to an attendant, `None` for first-available.
    pub const fn allocation(self) -> Option<AllocationStrategy> {
        match self {
            Self::FirstAvailable => None,
            Self::EvenDistribution => Some(AllocationStrategy::EvenDistribution),
            Self::HandicapPriority => Some(AllocationStrategy::HandicapPriority),
            Self::LargeVehicle => Some(AllocationStrategy::LargeVehicle),
            Self::Smart => Some(AllocationStrategy::Smart),
        }
    }
}

impl From<AllocationStrategy> for StrategyKind {
    fn from(strategy: AllocationStrategy) -> Self {
        match strategy {
            AllocationStrategy::EvenDistribution => Self::EvenDistribution,
            AllocationStrategy::HandicapPriority => Self::HandicapPriority,
            AllocationStrategy::LargeVehicle => Self::LargeVehicle,
            AllocationStrategy::Smart => Self::Smart,
        }
    }
}

impl FromStr for StrategyKind {
    type Err = ParkingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "first" | "first_available" => Ok(Self::FirstAvailable),
            "even" | "even_distribution" => Ok(Self::EvenDistribution),
            "handicap" | "handicap_priority" => Ok(Self::HandicapPriority),
            "large" | "large_vehicle" => Ok(Self::LargeVehicle),
            "smart" => Ok(Self::Smart),
            other => Err(ParkingError::InvalidConfig(format!("unknown strategy `{other}`"))),
        }
    }
}
