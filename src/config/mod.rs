//! Configuration models for lots, attendants, tariffs and strategy defaults.

pub mod facility;

pub use facility::{AttendantConfig, FacilityConfig, LotConfig};
