//! Build a [`ParkingService`] from a [`FacilityConfig`].

use std::sync::Arc;

use crate::config::FacilityConfig;
use crate::core::{Attendant, AuditSink, Lot, LotObserver, ParkingError};
use crate::service::ParkingService;
use crate::util::clock::Clock;
use crate::util::types::LotId;

/// Validate `cfg` and build a service on the system clock.
pub fn build_facility(cfg: &FacilityConfig) -> Result<ParkingService, ParkingError> {
    FacilityBuilder::new(cfg.clone()).build()
}

/// Collects the optional collaborators of a facility before building it.
pub struct FacilityBuilder {
    config: FacilityConfig,
    clock: Option<Arc<dyn Clock>>,
    audit: Option<Box<dyn AuditSink>>,
    observers: Vec<(LotId, Arc<dyn LotObserver>)>,
}

impl FacilityBuilder {
    /// Start from a configuration.
    pub fn new(config: FacilityConfig) -> Self {
        Self {
            config,
            clock: None,
            audit: None,
            observers: Vec::new(),
        }
    }

    /// The configuration being built.
    pub const fn config(&self) -> &FacilityConfig {
        &self.config
    }

    /// Use `clock` instead of the system clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Record audit events to `audit`.
    #[must_use]
    pub fn with_audit(mut self, audit: Box<dyn AuditSink>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Subscribe `observer` to a configured lot.
    #[must_use]
    pub fn with_observer(mut self, lot_id: impl Into<LotId>, observer: Arc<dyn LotObserver>) -> Self {
        self.observers.push((lot_id.into(), observer));
        self
    }

    /// Validate the configuration and assemble the service.
    pub fn build(self) -> Result<ParkingService, ParkingError> {
        let cfg = self.config;
        cfg.validate()
            .map_err(|e| ParkingError::InvalidConfig(format!("config invalid: {e}")))?;

        let mut service = ParkingService::new()
            .with_rates(cfg.billing)
            .with_default_strategy(cfg.default_strategy);
        if let Some(clock) = self.clock {
            service = service.with_clock(clock);
        }
        if let Some(audit) = self.audit {
            service = service.with_audit(audit);
        }

        for lot in &cfg.lots {
            service.add_lot(Lot::new(lot.id.clone(), lot.capacity))?;
        }
        for attendant in &cfg.attendants {
            let mut built = Attendant::new(attendant.id.clone(), attendant.name.clone(), attendant.lot_id.clone());
            built.set_active(attendant.active);
            service.add_attendant(built)?;
        }
        for (lot_id, observer) in self.observers {
            service.add_observer_to_lot(&lot_id, observer)?;
        }

        tracing::info!(
            lots = cfg.lots.len(),
            attendants = cfg.attendants.len(),
            strategy = ?cfg.default_strategy,
            "facility built"
        );
        Ok(service)
    }
}
