//! Identifier aliases shared across the facility.

/// Parking lot identifier, unique within a facility.
pub type LotId = String;

/// Space identifier within a lot. Spaces are numbered from 1.
pub type SpaceId = u32;

/// Ticket identifier derived from plate, lot, space and start time.
pub type TicketId = String;

/// Attendant identifier.
pub type AttendantId = String;

/// Vehicle license plate.
pub type Plate = String;

/// Milliseconds since the Unix epoch.
pub type TimestampMs = u128;
