//! Tests for builder modules

use std::sync::Arc;

use prometheus_parking_facility::builders::{build_facility, FacilityBuilder};
use prometheus_parking_facility::config::{AttendantConfig, FacilityConfig, LotConfig};
use prometheus_parking_facility::core::{ParkingError, RateConfig, StrategyKind, Vehicle};
use prometheus_parking_facility::infra::RecordingObserver;
use prometheus_parking_facility::util::ManualClock;

fn config() -> FacilityConfig {
    FacilityConfig {
        lots: vec![
            LotConfig {
                id: "LOT1".into(),
                capacity: 1,
            },
            LotConfig {
                id: "LOT2".into(),
                capacity: 2,
            },
        ],
        attendants: vec![
            AttendantConfig {
                id: "ATT1".into(),
                name: "Alice".into(),
                lot_id: Some("LOT1".into()),
                active: true,
            },
            AttendantConfig {
                id: "ATT2".into(),
                name: "Bob".into(),
                lot_id: None,
                active: false,
            },
        ],
        billing: RateConfig::new(800, 400),
        default_strategy: StrategyKind::FirstAvailable,
    }
}

#[test]
fn test_build_facility_from_config() {
    let service = build_facility(&config()).unwrap();
    assert_eq!(service.lots().len(), 2);
    assert_eq!(service.lots()[1].capacity(), 2);
    assert_eq!(service.attendants().len(), 2);
    assert!(!service.attendant("ATT2").unwrap().is_active());
    assert_eq!(service.rates(), &RateConfig::new(800, 400));
    assert_eq!(service.default_strategy(), StrategyKind::FirstAvailable);
}

#[test]
fn test_builder_rejects_invalid_config() {
    let mut cfg = config();
    cfg.lots[0].capacity = 0;
    let err = FacilityBuilder::new(cfg).build().err().unwrap();
    assert!(matches!(err, ParkingError::InvalidConfig(msg) if msg.contains("capacity")));
}

#[test]
fn test_builder_wires_observers_and_clock() {
    let observer = Arc::new(RecordingObserver::new());
    let clock = ManualClock::new(5_000);
    let mut service = FacilityBuilder::new(config())
        .with_clock(Arc::new(clock.clone()))
        .with_observer("LOT1", observer.clone())
        .build()
        .unwrap();

    let ticket = service.park_with_ticket(Vehicle::new("AAA", "Ann"), None).unwrap();
    assert_eq!(ticket.start_ms, 5_000);
    assert_eq!(observer.events().len(), 1);
}

#[test]
fn test_builder_rejects_observer_for_unknown_lot() {
    let observer = Arc::new(RecordingObserver::new());
    let err = FacilityBuilder::new(config())
        .with_observer("NOPE", observer)
        .build()
        .err()
        .unwrap();
    assert_eq!(err, ParkingError::LotNotFound("NOPE".into()));
}
