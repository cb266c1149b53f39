//! Fee calculation and bills.
//!
//! Stays shorter than an hour pay the minimum charge. Longer stays pay for
//! every started hour, never less than the minimum. Hours are counted in
//! integer nanoseconds so a stay of exactly N hours bills N hours.

use std::fmt;
use std::fmt::Write as _;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::Ticket;
use crate::util::clock::format_ms;
use crate::util::types::{Plate, TicketId, TimestampMs};

const HOUR: Duration = Duration::from_secs(3_600);

/// Monetary amount in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// From cents.
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// From whole currency units.
    pub const fn from_units(units: u64) -> Self {
        Self(units.saturating_mul(100))
    }

    /// Value in cents.
    pub const fn cents(self) -> u64 {
        self.0
    }

    /// Multiply by a count, saturating.
    #[must_use]
    pub const fn times(self, count: u64) -> Self {
        Self(self.0.saturating_mul(count))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Tariff applied when billing a stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateConfig {
    /// Charge per started hour.
    pub hourly_rate: Amount,
    /// Floor for any stay.
    pub minimum_charge: Amount,
}

impl RateConfig {
    /// Build a tariff from cent values.
    pub const fn new(hourly_rate_cents: u64, minimum_charge_cents: u64) -> Self {
        Self {
            hourly_rate: Amount::from_cents(hourly_rate_cents),
            minimum_charge: Amount::from_cents(minimum_charge_cents),
        }
    }
}

impl Default for RateConfig {
    /// $10.00 per hour, $5.00 minimum.
    fn default() -> Self {
        Self::new(1_000, 500)
    }
}

/// Hours billed for a stay of `duration`: every started hour counts.
pub fn billed_hours(duration: Duration) -> u64 {
    let hours = duration.as_nanos().div_ceil(HOUR.as_nanos());
    u64::try_from(hours).unwrap_or(u64::MAX)
}

/// Charge for a stay of `duration` under `rates`.
pub fn calculate_fee(duration: Duration, rates: &RateConfig) -> Amount {
    if duration < HOUR {
        return rates.minimum_charge;
    }
    rates
        .hourly_rate
        .times(billed_hours(duration))
        .max(rates.minimum_charge)
}

/// Charge computed from a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    /// Ticket billed.
    pub ticket_id: TicketId,
    /// Plate on the ticket.
    pub plate: Plate,
    /// Admission time.
    pub start_ms: TimestampMs,
    /// Exit time; absent when billing a still-active ticket.
    pub end_ms: Option<TimestampMs>,
    /// Billed duration.
    pub duration: Duration,
    /// Hourly rate applied.
    pub hourly_rate: Amount,
    /// Minimum charge applied.
    pub minimum_charge: Amount,
    /// Amount due.
    pub total: Amount,
}

impl Bill {
    /// Bill `ticket` under `rates`.
    ///
    /// An active ticket is billed up to `now_ms`; close it first for a final bill.
    pub fn generate(ticket: &Ticket, rates: &RateConfig, now_ms: TimestampMs) -> Self {
        let duration = ticket.duration(now_ms);
        Self {
            ticket_id: ticket.id.clone(),
            plate: ticket.plate.clone(),
            start_ms: ticket.start_ms,
            end_ms: ticket.end_ms,
            duration,
            hourly_rate: rates.hourly_rate,
            minimum_charge: rates.minimum_charge,
            total: calculate_fee(duration, rates),
        }
    }

    /// Printable receipt.
    pub fn render(&self) -> String {
        let secs = self.duration.as_secs();
        let mut out = String::new();
        let _ = writeln!(out, "=================================");
        let _ = writeln!(out, "         PARKING BILL");
        let _ = writeln!(out, "=================================");
        let _ = writeln!(out, "Ticket ID: {}", self.ticket_id);
        let _ = writeln!(out, "License Plate: {}", self.plate);
        let _ = writeln!(out, "Parked At: {}", format_ms(self.start_ms));
        let _ = writeln!(
            out,
            "Unparked At: {}",
            self.end_ms.map_or_else(|| "(still parked)".to_string(), format_ms)
        );
        let _ = writeln!(out, "Duration: {}h {:02}m {:02}s", secs / 3_600, secs % 3_600 / 60, secs % 60);
        let _ = writeln!(out, "Hourly Rate: {}", self.hourly_rate);
        let _ = writeln!(out, "Total Amount: {}", self.total);
        let _ = writeln!(out, "=================================");
        out
    }
}
