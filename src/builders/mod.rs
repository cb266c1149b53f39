//! Builders that assemble a ready facility from configuration.

pub mod facility_builder;

pub use facility_builder::{build_facility, FacilityBuilder};
