//! Audit sink implementations.
//!
//! The service reports every admission, release, ticket change and capacity
//! edge to an optional [`AuditSink`].

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::util::types::{LotId, Plate, SpaceId, TimestampMs};

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Vehicle took a space.
    Admit,
    /// Vehicle left its space.
    Release,
    /// Ticket issued.
    TicketOpened,
    /// Ticket closed.
    TicketClosed,
    /// Lot crossed into full.
    LotFull,
    /// Lot crossed out of full.
    LotAvailable,
}

/// Audit event structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Event identifier.
    pub event_id: String,
    /// Action taken.
    pub action: AuditAction,
    /// Lot involved.
    pub lot_id: LotId,
    /// Space involved, if any.
    pub space_id: Option<SpaceId>,
    /// Vehicle involved, if any.
    pub plate: Option<Plate>,
    /// Timestamp milliseconds.
    pub created_at_ms: TimestampMs,
    /// Additional context (ticket id, attendant, ...).
    pub detail: Option<String>,
}

/// Audit sink abstraction.
pub trait AuditSink: Send {
    /// Record an audit event.
    fn record(&mut self, event: AuditEvent);
}

/// Bounded in-memory audit log. Clones share the same buffer, so a test can
/// keep one handle while the service owns another.
#[derive(Debug, Clone)]
pub struct InMemoryAuditSink {
    events: Arc<Mutex<VecDeque<AuditEvent>>>,
    max_events: usize,
}

impl InMemoryAuditSink {
    /// Create a new in-memory sink with a bounded buffer.
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Arc::new(Mutex::new(VecDeque::with_capacity(max_events))),
            max_events,
        }
    }

    /// Retrieve a snapshot of stored events.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().iter().cloned().collect()
    }

    /// Stored events with the given action.
    pub fn events_for(&self, action: AuditAction) -> Vec<AuditEvent> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.action == action)
            .cloned()
            .collect()
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&mut self, event: AuditEvent) {
        if self.max_events == 0 {
            return;
        }
        let mut events = self.events.lock();
        if events.len() >= self.max_events {
            events.pop_front();
        }
        events.push_back(event);
    }
}

/// Sink that forwards events to `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&mut self, event: AuditEvent) {
        tracing::info!(
            target: "prometheus_parking_facility::audit",
            event_id = %event.event_id,
            action = ?event.action,
            lot = %event.lot_id,
            space = ?event.space_id,
            plate = ?event.plate,
            detail = ?event.detail,
            "audit"
        );
    }
}

/// Helper to build an audit event with a fresh id.
pub fn build_audit_event(
    action: AuditAction,
    lot_id: impl Into<LotId>,
    space_id: Option<SpaceId>,
    plate: Option<&str>,
    detail: Option<String>,
    created_at_ms: TimestampMs,
) -> AuditEvent {
    AuditEvent {
        event_id: uuid::Uuid::new_v4().to_string(),
        action,
        lot_id: lot_id.into(),
        space_id,
        plate: plate.map(str::to_string),
        created_at_ms,
        detail,
    }
}
