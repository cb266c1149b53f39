//! Service layer: the facility facade, its thread-safe handle, the
//! investigative query layer and caller-facing models.

pub mod api;
pub mod investigation;
pub mod parking;
pub mod shared;

pub use api::{submit_park_request, LotAnalytics, ParkRequest, ParkResponse, Placement, VehicleLocation};
pub use investigation::{InvestigationService, LocationStatistics, VehicleFinding, VehicleQuery};
pub use parking::ParkingService;
pub use shared::SharedParkingService;
