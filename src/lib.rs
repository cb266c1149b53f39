//! # Prometheus Parking Facility
//!
//! An allocation and notification engine for a multi-lot parking facility.
//!
//! The facility is a set of fixed-capacity lots. Vehicles are admitted into a
//! lot chosen by an allocation strategy, optionally through an attendant, and
//! optionally under a ticket that is billed at exit. Lots notify their
//! observers only when they cross the full boundary.
//!
//! ## Key Features
//!
//! - **Allocation strategies**: even distribution, handicap priority, large
//!   vehicle and a composite "smart" policy, plus first-available
//! - **Edge-triggered observers**: `on_lot_full` / `on_lot_available` fire
//!   exactly once per boundary crossing
//! - **Tickets and billing**: at most one active ticket per plate, hourly
//!   rounding-up with a minimum charge, integer cents throughout
//! - **Investigation queries**: read-only searches by color, make, row and
//!   arrival window
//! - **Thread-safe facade**: [`service::SharedParkingService`] serializes all
//!   operations behind one `parking_lot` mutex
//!
//! ## Example
//!
//! ```rust
//! use prometheus_parking_facility::core::{Lot, Vehicle};
//! use prometheus_parking_facility::service::ParkingService;
//!
//! let mut service = ParkingService::new();
//! service.add_lot(Lot::new("LOT1", 2)).unwrap();
//! let ticket = service.park_with_ticket(Vehicle::new("ABC123", "Ann"), None).unwrap();
//! assert_eq!(ticket.lot_id, "LOT1");
//! let (_, bill) = service.unpark_with_billing("ABC123").unwrap();
//! assert_eq!(bill.total.cents(), 500);
//! ```
//!
//! For complete scenarios see `tests/allocation_test.rs` and
//! `tests/ticket_billing_test.rs`.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Allocation engine: spaces, lots, strategies, attendants, tickets and billing.
pub mod core;
/// Configuration models for lots, attendants, tariffs and strategy defaults.
pub mod config;
/// Builders to construct a facility from configuration.
pub mod builders;
/// Infrastructure adapters: concrete observers of lot capacity.
pub mod infra;
/// Service facade, request API, shared handle and investigation queries.
pub mod service;
/// Shared utilities.
pub mod util;
