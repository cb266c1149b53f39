//! Allocation engine: spaces, lots, strategies, attendants, tickets and billing.

pub mod attendant;
pub mod audit;
pub mod billing;
pub mod error;
pub mod lot;
pub mod observer;
pub mod space;
pub mod strategy;
pub mod ticket;
pub mod vehicle;

pub use attendant::{Attendant, Decision, FIRST_AVAILABLE_REASON};
pub use audit::{
    build_audit_event, AuditAction, AuditEvent, AuditSink, InMemoryAuditSink, TracingAuditSink,
};
pub use billing::{billed_hours, calculate_fee, Amount, Bill, RateConfig};
pub use error::{AppResult, ErrorKind, ParkingError};
pub use lot::{Lot, LotUtilization};
pub use observer::{LotObserver, LotTransition, ObserverHandle};
pub use space::{RowLabel, Space, SpaceDetails, ROW_BAND_LIMITS};
pub use strategy::{AllocationStrategy, StrategyKind};
pub use ticket::{Ticket, TicketStore};
pub use vehicle::{Vehicle, VehicleSize, UNKNOWN};
