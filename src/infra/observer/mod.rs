//! Observer adapters.

pub mod memory;
pub mod signage;

pub use memory::{LotEvent, RecordingObserver};
pub use signage::{OwnerObserver, SecurityObserver};
