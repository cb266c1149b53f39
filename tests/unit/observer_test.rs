//! Tests for lot observers

use std::sync::Arc;

use prometheus_parking_facility::core::{Lot, LotTransition, Vehicle};
use prometheus_parking_facility::infra::{OwnerObserver, RecordingObserver, SecurityObserver};

fn car(plate: &str) -> Vehicle {
    Vehicle::new(plate, "owner")
}

#[test]
fn test_owner_sign_follows_capacity() {
    let owner = Arc::new(OwnerObserver::new("Olga"));
    let mut lot = Lot::new("LOT1", 1);
    lot.add_observer(owner.clone());

    assert_eq!(owner.owner(), "Olga");
    assert!(!owner.sign_shown("LOT1"));
    lot.try_admit(car("A"), 0).unwrap();
    assert!(owner.sign_shown("LOT1"));
    lot.release("A").unwrap();
    assert!(!owner.sign_shown("LOT1"));
}

#[test]
fn test_security_redirects_only_full_lots() {
    let security = Arc::new(SecurityObserver::new("S1"));
    let mut lot1 = Lot::new("LOT1", 1);
    let mut lot2 = Lot::new("LOT2", 2);
    lot1.add_observer(security.clone());
    lot2.add_observer(security.clone());

    lot1.try_admit(car("A"), 0).unwrap();
    lot2.try_admit(car("B"), 0).unwrap();
    assert_eq!(security.redirected_lots(), vec!["LOT1".to_string()]);

    lot2.try_admit(car("C"), 0).unwrap();
    assert_eq!(security.redirected_lots(), vec!["LOT1".to_string(), "LOT2".to_string()]);
    assert_eq!(security.staff_id(), "S1");
}

#[test]
fn test_recording_observer_counts_and_clears() {
    let recorder = Arc::new(RecordingObserver::new());
    let mut lot = Lot::new("LOT1", 1);
    lot.add_observer(recorder.clone());

    for _ in 0..3 {
        lot.try_admit(car("A"), 0).unwrap();
        lot.release("A").unwrap();
    }
    assert_eq!(recorder.count(LotTransition::Full), 3);
    assert_eq!(recorder.count(LotTransition::Available), 3);
    let events = recorder.events();
    assert_eq!(events[0].transition, LotTransition::Full);
    assert_eq!(events[1].transition, LotTransition::Available);

    recorder.clear();
    assert!(recorder.events().is_empty());
}

#[test]
fn test_removed_observer_hears_nothing() {
    let kept = Arc::new(RecordingObserver::new());
    let removed = Arc::new(RecordingObserver::new());
    let mut lot = Lot::new("LOT1", 1);
    lot.add_observer(kept.clone());
    let handle = lot.add_observer(removed.clone());

    assert!(lot.remove_observer(handle));
    assert!(!lot.remove_observer(handle));
    assert_eq!(lot.observer_count(), 1);

    lot.try_admit(car("A"), 0).unwrap();
    assert_eq!(kept.count(LotTransition::Full), 1);
    assert!(removed.events().is_empty());
}

#[test]
fn test_same_observer_registered_twice_is_notified_twice() {
    let recorder = Arc::new(RecordingObserver::new());
    let mut lot = Lot::new("LOT1", 1);
    let first = lot.add_observer(recorder.clone());
    let second = lot.add_observer(recorder.clone());
    assert_ne!(first, second);

    lot.try_admit(car("A"), 0).unwrap();
    assert_eq!(recorder.count(LotTransition::Full), 2);

    lot.remove_observer(first);
    lot.release("A").unwrap();
    assert_eq!(recorder.count(LotTransition::Available), 1);
}
