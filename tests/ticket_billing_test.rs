//! Integration tests for tickets, exits and billing.

use std::sync::Arc;
use std::time::Duration;

use prometheus_parking_facility::core::{
    Amount, Attendant, Lot, ParkingError, RateConfig, StrategyKind, TicketStore, Vehicle,
};
use prometheus_parking_facility::service::{submit_park_request, ParkRequest, ParkingService};
use prometheus_parking_facility::util::ManualClock;

const START_MS: u64 = 1_700_000_000_000;

fn car(plate: &str) -> Vehicle {
    Vehicle::new(plate, "driver")
}

fn facility() -> (ParkingService, ManualClock) {
    let clock = ManualClock::new(START_MS);
    let mut service = ParkingService::new().with_clock(Arc::new(clock.clone()));
    service.add_lot(Lot::new("LOT1", 5)).unwrap();
    service.add_attendant(Attendant::new("ATT1", "Alice", Some("LOT1".into()))).unwrap();
    (service, clock)
}

fn stay(minutes: u64) -> Amount {
    let (mut service, clock) = facility();
    service.park_with_ticket(car("ABC"), None).unwrap();
    clock.advance(Duration::from_secs(minutes * 60));
    let (_, bill) = service.unpark_with_billing("ABC").unwrap();
    bill.total
}

#[test]
fn test_fee_schedule() {
    assert_eq!(stay(30), Amount::from_cents(500));
    assert_eq!(stay(60), Amount::from_cents(1_000));
    assert_eq!(stay(90), Amount::from_cents(2_000));
    assert_eq!(stay(120), Amount::from_cents(2_000));
}

#[test]
fn test_ticket_fields_and_history() {
    let (mut service, clock) = facility();
    let ticket = service.park_with_ticket(car("ABC"), Some("ATT1")).unwrap();
    assert_eq!(ticket.id, format!("ABC_LOT1_1_{START_MS}"));
    assert!(ticket.active);
    assert_eq!(ticket.attendant_id.as_deref(), Some("ATT1"));
    assert_eq!(service.active_ticket("ABC").unwrap().id, ticket.id);
    assert_eq!(service.find_vehicle("ABC").unwrap().attendant_id.as_deref(), Some("ATT1"));

    clock.advance(Duration::from_secs(45 * 60));
    let (vehicle, bill) = service.unpark_with_billing("ABC").unwrap();
    assert_eq!(vehicle.plate(), "ABC");
    assert_eq!(bill.duration, Duration::from_secs(45 * 60));
    assert_eq!(bill.end_ms, Some(u128::from(START_MS) + 45 * 60 * 1_000));

    clock.advance(Duration::from_secs(60));
    service.park_with_ticket(car("ABC"), None).unwrap();
    let history = service.parking_history("ABC");
    assert_eq!(history.len(), 2);
    assert!(!history[0].active);
    assert!(history[1].active);
    assert!(service.parking_history("NOPE").is_empty());
}

#[test]
fn test_second_ticket_supersedes_first() {
    let mut store = TicketStore::new();
    let first = store.open("ABC", "LOT1", 1, None, 1_000).id.clone();
    let second = store.open("ABC", "LOT2", 4, None, 2_000).id.clone();

    assert_eq!(store.active("ABC").unwrap().id, second);
    assert_eq!(
        store.close(&first, 3_000).unwrap_err(),
        ParkingError::TicketAlreadyClosed(first.clone())
    );

    let history = store.history("ABC");
    assert_eq!(history.len(), 2);
    assert_eq!(history.iter().filter(|t| !t.active).count(), 1);
    assert_eq!(history[0].end_ms, Some(2_000));
    assert_eq!(store.iter().filter(|t| t.active).count(), 1);
}

#[test]
fn test_unpark_with_billing_requires_ticket() {
    let (mut service, _) = facility();
    service.park(car("NOTIX")).unwrap();
    assert_eq!(
        service.unpark_with_billing("NOTIX").unwrap_err(),
        ParkingError::NoActiveTicket("NOTIX".into())
    );
    // Nothing was released.
    assert!(service.find_vehicle("NOTIX").is_ok());
    assert_eq!(service.unpark_with_billing("").unwrap_err(), ParkingError::EmptyPlate);
}

#[test]
fn test_plain_unpark_closes_ticket() {
    let (mut service, clock) = facility();
    let ticket = service.park_with_ticket(car("ABC"), None).unwrap();
    clock.advance(Duration::from_secs(10));
    service.unpark("ABC").unwrap();

    let stored = service.tickets().get(&ticket.id).unwrap();
    assert!(!stored.active);
    assert!(service.active_ticket("ABC").is_err());
}

#[test]
fn test_bill_for_running_and_closed_tickets() {
    let (mut service, clock) = facility();
    let ticket = service.park_with_ticket(car("ABC"), None).unwrap();
    clock.advance(Duration::from_secs(3 * 3_600 + 1));

    let running = service.bill_for(&ticket.id).unwrap();
    assert_eq!(running.end_ms, None);
    assert_eq!(running.total, Amount::from_cents(4_000));
    assert!(running.render().contains("(still parked)"));

    service.unpark_with_billing("ABC").unwrap();
    clock.advance(Duration::from_secs(3_600));
    let closed = service.bill_for(&ticket.id).unwrap();
    assert_eq!(closed.total, Amount::from_cents(4_000));
    assert_eq!(
        service.bill_for("missing").unwrap_err(),
        ParkingError::TicketNotFound("missing".into())
    );
}

#[test]
fn test_custom_rates_and_receipt() {
    let (service, clock) = facility();
    let mut service = service.with_rates(RateConfig::new(250, 600));
    service.park_with_ticket(car("ABC"), None).unwrap();
    clock.advance(Duration::from_secs(90 * 60));
    let (_, bill) = service.unpark_with_billing("ABC").unwrap();
    assert_eq!(bill.total, Amount::from_cents(600));

    let receipt = bill.render();
    assert!(receipt.contains("PARKING BILL"));
    assert!(receipt.contains("License Plate: ABC"));
    assert!(receipt.contains("Duration: 1h 30m 00s"));
    assert!(receipt.contains("Hourly Rate: $2.50"));
    assert!(receipt.contains("Total Amount: $6.00"));
}

#[test]
fn test_ticketed_entry_takes_first_lot_with_room() {
    let mut service = ParkingService::new().with_default_strategy(StrategyKind::EvenDistribution);
    service.add_lot(Lot::new("LOT1", 2)).unwrap();
    service.add_lot(Lot::new("LOT2", 5)).unwrap();

    let first = service.park_with_ticket(car("T1"), None).unwrap();
    let second = service.park_with_ticket(car("T2"), None).unwrap();
    let third = service.park_with_ticket(car("T3"), None).unwrap();
    assert_eq!((first.lot_id.as_str(), first.space_id), ("LOT1", 1));
    assert_eq!((second.lot_id.as_str(), second.space_id), ("LOT1", 2));
    assert_eq!(third.lot_id, "LOT2");

    // Requests without a strategy still follow the configured default.
    service.unpark("T1").unwrap();
    let response = submit_park_request(
        &mut service,
        ParkRequest {
            vehicle: Some(car("R1")),
            attendant_id: None,
            strategy: None,
            ticketed: true,
        },
    )
    .unwrap();
    assert_eq!(response.lot_id, "LOT2");
}
