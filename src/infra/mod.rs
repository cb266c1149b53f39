//! Infrastructure adapters: concrete observers of lot capacity.

pub mod observer;

pub use observer::{LotEvent, OwnerObserver, RecordingObserver, SecurityObserver};
