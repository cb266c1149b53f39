//! Facility configuration structures.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::{Amount, AppResult, RateConfig, StrategyKind};
use crate::util::types::{AttendantId, LotId};

/// Environment variable naming a JSON config file.
pub const ENV_CONFIG_PATH: &str = "PARKING_CONFIG";
/// Environment variable listing lots as `ID:CAPACITY,ID:CAPACITY`.
pub const ENV_LOTS: &str = "PARKING_LOTS";
/// Environment variable with the hourly rate in cents.
pub const ENV_HOURLY_RATE_CENTS: &str = "PARKING_HOURLY_RATE_CENTS";
/// Environment variable with the minimum charge in cents.
pub const ENV_MINIMUM_CHARGE_CENTS: &str = "PARKING_MINIMUM_CHARGE_CENTS";
/// Environment variable with the default strategy name.
pub const ENV_STRATEGY: &str = "PARKING_STRATEGY";

/// One lot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotConfig {
    /// Lot identifier.
    pub id: LotId,
    /// Number of spaces.
    pub capacity: u32,
}

/// One attendant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendantConfig {
    /// Attendant identifier.
    pub id: AttendantId,
    /// Display name.
    pub name: String,
    /// Lot the attendant is stationed at.
    #[serde(default)]
    pub lot_id: Option<LotId>,
    /// Whether the attendant starts on duty.
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

/// Root facility configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityConfig {
    /// Lots in allocation order.
    pub lots: Vec<LotConfig>,
    /// Attendants on the roster.
    #[serde(default)]
    pub attendants: Vec<AttendantConfig>,
    /// Tariff used by ticketed exits.
    #[serde(default)]
    pub billing: RateConfig,
    /// Strategy applied to requests that do not name one.
    #[serde(default)]
    pub default_strategy: StrategyKind,
}

impl LotConfig {
    /// Validate lot configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("lot id must not be empty".into());
        }
        if self.capacity == 0 {
            return Err("capacity must be greater than 0".into());
        }
        Ok(())
    }
}

impl FacilityConfig {
    /// Validate all lots and attendants and ensure at least one lot exists.
    pub fn validate(&self) -> Result<(), String> {
        if self.lots.is_empty() {
            return Err("at least one lot must be defined".into());
        }
        let mut lot_ids = HashSet::new();
        for lot in &self.lots {
            lot.validate()
                .map_err(|e| format!("lot `{}` invalid: {e}", lot.id))?;
            if !lot_ids.insert(lot.id.as_str()) {
                return Err(format!("lot `{}` defined twice", lot.id));
            }
        }
        let mut attendant_ids = HashSet::new();
        for attendant in &self.attendants {
            if attendant.id.trim().is_empty() {
                return Err("attendant id must not be empty".into());
            }
            if !attendant_ids.insert(attendant.id.as_str()) {
                return Err(format!("attendant `{}` defined twice", attendant.id));
            }
            if let Some(lot) = &attendant.lot_id {
                if !lot_ids.contains(lot.as_str()) {
                    return Err(format!(
                        "attendant `{}` stationed at unknown lot `{lot}`",
                        attendant.id
                    ));
                }
            }
        }
        if self.billing.hourly_rate.cents() == 0 && self.billing.minimum_charge.cents() == 0 {
            return Err("billing must charge something: hourly rate and minimum are both 0".into());
        }
        Ok(())
    }

    /// Parse facility configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and validate a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading facility config {}", path.display()))?;
        Self::from_json_str(&raw)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("loading facility config {}", path.display()))
    }

    /// Load configuration from the environment, after reading `.env` if present.
    ///
    /// `PARKING_CONFIG` points at a JSON file and wins when set. Otherwise the
    /// lots come from `PARKING_LOTS` and the tariff and strategy fall back to
    /// their defaults unless overridden.
    pub fn from_env() -> AppResult<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "ignoring unreadable .env file");
            }
        }
        if let Ok(path) = std::env::var(ENV_CONFIG_PATH) {
            return Self::from_json_file(path);
        }
        let lots = std::env::var(ENV_LOTS)
            .with_context(|| format!("{ENV_CONFIG_PATH} or {ENV_LOTS} must be set"))?;
        Self::from_vars(
            &lots,
            std::env::var(ENV_HOURLY_RATE_CENTS).ok().as_deref(),
            std::env::var(ENV_MINIMUM_CHARGE_CENTS).ok().as_deref(),
            std::env::var(ENV_STRATEGY).ok().as_deref(),
        )
    }

    /// Build a configuration from the raw environment values.
    pub fn from_vars(
        lots: &str,
        hourly_rate_cents: Option<&str>,
        minimum_charge_cents: Option<&str>,
        strategy: Option<&str>,
    ) -> AppResult<Self> {
        let lots = lots
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(parse_lot_entry)
            .collect::<AppResult<Vec<_>>>()?;

        let mut billing = RateConfig::default();
        if let Some(raw) = hourly_rate_cents {
            billing.hourly_rate = Amount::from_cents(
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("{ENV_HOURLY_RATE_CENTS}=`{raw}`"))?,
            );
        }
        if let Some(raw) = minimum_charge_cents {
            billing.minimum_charge = Amount::from_cents(
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("{ENV_MINIMUM_CHARGE_CENTS}=`{raw}`"))?,
            );
        }
        let default_strategy = strategy
            .map(str::parse::<StrategyKind>)
            .transpose()?
            .unwrap_or_default();

        let cfg = Self {
            lots,
            attendants: Vec::new(),
            billing,
            default_strategy,
        };
        cfg.validate().map_err(anyhow::Error::msg)?;
        Ok(cfg)
    }
}

fn parse_lot_entry(entry: &str) -> AppResult<LotConfig> {
    let (id, capacity) = entry
        .split_once(':')
        .with_context(|| format!("lot entry `{entry}` must look like ID:CAPACITY"))?;
    let capacity = capacity
        .trim()
        .parse::<u32>()
        .with_context(|| format!("lot entry `{entry}` has a bad capacity"))?;
    Ok(LotConfig {
        id: id.trim().to_string(),
        capacity,
    })
}
