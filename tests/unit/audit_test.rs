//! Tests for audit functionality

use prometheus_parking_facility::core::{
    build_audit_event, AuditAction, AuditSink, InMemoryAuditSink, Lot, TracingAuditSink, Vehicle,
};
use prometheus_parking_facility::service::ParkingService;

#[test]
fn test_build_audit_event() {
    let event = build_audit_event(AuditAction::Admit, "LOT1", Some(3), Some("ABC"), None, 42);
    assert_eq!(event.action, AuditAction::Admit);
    assert_eq!(event.lot_id, "LOT1");
    assert_eq!(event.space_id, Some(3));
    assert_eq!(event.plate.as_deref(), Some("ABC"));
    assert_eq!(event.created_at_ms, 42);
    assert!(!event.event_id.is_empty());
}

#[test]
fn test_event_ids_are_unique() {
    let a = build_audit_event(AuditAction::Release, "LOT1", None, None, None, 0);
    let b = build_audit_event(AuditAction::Release, "LOT1", None, None, None, 0);
    assert_ne!(a.event_id, b.event_id);
}

#[test]
fn test_in_memory_sink_is_bounded() {
    let mut sink = InMemoryAuditSink::new(2);
    for n in 0..3 {
        sink.record(build_audit_event(AuditAction::Admit, format!("L{n}"), None, None, None, 0));
    }
    let lots: Vec<_> = sink.events().into_iter().map(|e| e.lot_id).collect();
    assert_eq!(lots, vec!["L1".to_string(), "L2".to_string()]);
}

#[test]
fn test_tracing_sink_accepts_events() {
    let mut sink = TracingAuditSink;
    sink.record(build_audit_event(AuditAction::LotFull, "LOT1", None, None, None, 0));
}

#[test]
fn test_service_reports_capacity_edges() {
    let sink = InMemoryAuditSink::new(100);
    let mut service = ParkingService::new().with_audit(Box::new(sink.clone()));
    service.add_lot(Lot::new("LOT1", 1)).unwrap();

    let ticket = service.park_with_ticket(Vehicle::new("AAA", "Ann"), None).unwrap();
    service.unpark_with_billing("AAA").unwrap();

    assert_eq!(sink.events_for(AuditAction::Admit).len(), 1);
    assert_eq!(sink.events_for(AuditAction::LotFull).len(), 1);
    assert_eq!(sink.events_for(AuditAction::Release).len(), 1);
    assert_eq!(sink.events_for(AuditAction::LotAvailable).len(), 1);
    let opened = sink.events_for(AuditAction::TicketOpened);
    assert_eq!(opened.len(), 1);
    assert_eq!(opened[0].detail.as_deref(), Some(ticket.id.as_str()));
    assert_eq!(sink.events_for(AuditAction::TicketClosed).len(), 1);
}

#[test]
fn test_failed_admission_is_not_audited() {
    let sink = InMemoryAuditSink::new(100);
    let mut service = ParkingService::new().with_audit(Box::new(sink.clone()));
    service.add_lot(Lot::new("LOT1", 1)).unwrap();
    service.park(Vehicle::new("AAA", "Ann")).unwrap();

    assert!(service.park(Vehicle::new("BBB", "Bob")).is_err());
    assert!(service.unpark("ZZZ").is_err());
    assert_eq!(sink.events_for(AuditAction::Admit).len(), 1);
    assert!(sink.events_for(AuditAction::Release).is_empty());
}
