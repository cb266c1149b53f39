//! Error types for facility operations.

use thiserror::Error;

use crate::util::types::{AttendantId, LotId, Plate, SpaceId, TicketId};

/// Broad classification of a [`ParkingError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No room where room was requested. Expected and recoverable by the caller.
    CapacityExhausted,
    /// A lookup missed.
    NotFound,
    /// The caller violated a precondition; nothing was mutated.
    Precondition,
}

/// Errors produced by lots, strategies, attendants, tickets and the service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParkingError {
    /// The lot has no free space.
    #[error("parking lot {0} is full")]
    LotFull(LotId),
    /// Every candidate lot is full, or there are no lots.
    #[error("no available parking spaces in any lot")]
    NoLotAvailable,
    /// The selected lot had no free space by the time a space was looked up.
    #[error("no available space in selected lot {0}")]
    NoSpaceInSelectedLot(LotId),
    /// A specific space could not be occupied (missing or already taken).
    #[error("space {space_id} in lot {lot_id} is not available")]
    SpaceUnavailable {
        /// Lot holding the space.
        lot_id: LotId,
        /// Requested space.
        space_id: SpaceId,
    },
    /// No lot holds a vehicle with this plate.
    #[error("car {0} not found")]
    CarNotFound(Plate),
    /// Unknown attendant.
    #[error("attendant {0} not found")]
    AttendantNotFound(AttendantId),
    /// Unknown lot.
    #[error("lot {0} not found")]
    LotNotFound(LotId),
    /// The plate has no active ticket.
    #[error("no active ticket found for {0}")]
    NoActiveTicket(Plate),
    /// Unknown ticket id.
    #[error("ticket {0} not found")]
    TicketNotFound(TicketId),
    /// The ticket was closed already.
    #[error("ticket {0} is already closed")]
    TicketAlreadyClosed(TicketId),
    /// License plate was empty.
    #[error("license plate cannot be empty")]
    EmptyPlate,
    /// A request carried no vehicle record.
    #[error("vehicle record is missing")]
    NilVehicle,
    /// The plate is already parked somewhere in the facility.
    #[error("car {0} is already parked")]
    AlreadyParked(Plate),
    /// The attendant is off duty.
    #[error("attendant {0} is not active")]
    AttendantInactive(AttendantId),
    /// The handicap entry path was used for a vehicle without a permit.
    #[error("car {0} is not registered as handicap vehicle")]
    CarNotHandicapForHandicapStrategy(Plate),
    /// The large-vehicle entry path was used for a smaller vehicle.
    #[error("car {0} is not classified as large vehicle")]
    CarNotLargeForLargeStrategy(Plate),
    /// A lot with this id is already registered.
    #[error("lot {0} already registered")]
    DuplicateLot(LotId),
    /// An attendant with this id is already registered.
    #[error("attendant {0} already registered")]
    DuplicateAttendant(AttendantId),
    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ParkingError {
    /// Classify the error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::LotFull(_)
            | Self::NoLotAvailable
            | Self::NoSpaceInSelectedLot(_)
            | Self::SpaceUnavailable { .. } => ErrorKind::CapacityExhausted,
            Self::CarNotFound(_)
            | Self::AttendantNotFound(_)
            | Self::LotNotFound(_)
            | Self::NoActiveTicket(_)
            | Self::TicketNotFound(_) => ErrorKind::NotFound,
            Self::TicketAlreadyClosed(_)
            | Self::EmptyPlate
            | Self::NilVehicle
            | Self::AlreadyParked(_)
            | Self::AttendantInactive(_)
            | Self::CarNotHandicapForHandicapStrategy(_)
            | Self::CarNotLargeForLargeStrategy(_)
            | Self::DuplicateLot(_)
            | Self::DuplicateAttendant(_)
            | Self::InvalidConfig(_) => ErrorKind::Precondition,
        }
    }
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
