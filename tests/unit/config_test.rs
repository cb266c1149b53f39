//! Tests for configuration modules

use prometheus_parking_facility::config::{AttendantConfig, FacilityConfig, LotConfig};
use prometheus_parking_facility::core::{Amount, RateConfig, StrategyKind};

fn lot(id: &str, capacity: u32) -> LotConfig {
    LotConfig {
        id: id.to_string(),
        capacity,
    }
}

fn facility() -> FacilityConfig {
    FacilityConfig {
        lots: vec![lot("LOT1", 10), lot("LOT2", 5)],
        attendants: vec![AttendantConfig {
            id: "ATT1".into(),
            name: "Alice".into(),
            lot_id: Some("LOT1".into()),
            active: true,
        }],
        billing: RateConfig::default(),
        default_strategy: StrategyKind::Smart,
    }
}

#[test]
fn test_lot_config_validation() {
    assert!(lot("LOT1", 10).validate().is_ok());
    assert!(lot("LOT1", 0).validate().is_err());
    assert!(lot("  ", 10).validate().is_err());
}

#[test]
fn test_facility_config_valid() {
    assert!(facility().validate().is_ok());
}

#[test]
fn test_facility_config_rejects_no_lots() {
    let mut cfg = facility();
    cfg.lots.clear();
    cfg.attendants.clear();
    assert!(cfg.validate().unwrap_err().contains("at least one lot"));
}

#[test]
fn test_facility_config_rejects_duplicates() {
    let mut cfg = facility();
    cfg.lots.push(lot("LOT1", 3));
    assert!(cfg.validate().unwrap_err().contains("defined twice"));

    let mut cfg = facility();
    let dup = cfg.attendants[0].clone();
    cfg.attendants.push(dup);
    assert!(cfg.validate().unwrap_err().contains("defined twice"));
}

#[test]
fn test_facility_config_rejects_unknown_station() {
    let mut cfg = facility();
    cfg.attendants[0].lot_id = Some("NOPE".into());
    assert!(cfg.validate().unwrap_err().contains("unknown lot"));
}

#[test]
fn test_facility_config_rejects_free_parking() {
    let mut cfg = facility();
    cfg.billing = RateConfig::new(0, 0);
    assert!(cfg.validate().is_err());
}

#[test]
fn test_from_json_str_applies_defaults() {
    let cfg = FacilityConfig::from_json_str(
        r#"{"lots":[{"id":"LOT1","capacity":4}],"attendants":[{"id":"A1","name":"Al"}]}"#,
    )
    .unwrap();
    assert_eq!(cfg.lots, vec![lot("LOT1", 4)]);
    assert!(cfg.attendants[0].active);
    assert_eq!(cfg.attendants[0].lot_id, None);
    assert_eq!(cfg.billing, RateConfig::default());
    assert_eq!(cfg.default_strategy, StrategyKind::EvenDistribution);
}

#[test]
fn test_from_json_str_reads_strategy_and_tariff() {
    let cfg = FacilityConfig::from_json_str(
        r#"{"lots":[{"id":"LOT1","capacity":4}],
            "billing":{"hourly_rate":250,"minimum_charge":100},
            "default_strategy":"large_vehicle"}"#,
    )
    .unwrap();
    assert_eq!(cfg.billing.hourly_rate, Amount::from_cents(250));
    assert_eq!(cfg.billing.minimum_charge, Amount::from_cents(100));
    assert_eq!(cfg.default_strategy, StrategyKind::LargeVehicle);
}

#[test]
fn test_from_json_str_errors() {
    assert!(FacilityConfig::from_json_str("not json").unwrap_err().starts_with("parse error"));
    assert!(FacilityConfig::from_json_str(r#"{"lots":[]}"#).is_err());
}

#[test]
fn test_from_json_file_missing() {
    let err = FacilityConfig::from_json_file("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("reading facility config"));
}

#[test]
fn test_from_vars() {
    let cfg = FacilityConfig::from_vars("LOT1:10, LOT2:3", Some("750"), None, Some("handicap")).unwrap();
    assert_eq!(cfg.lots, vec![lot("LOT1", 10), lot("LOT2", 3)]);
    assert_eq!(cfg.billing.hourly_rate, Amount::from_cents(750));
    assert_eq!(cfg.billing.minimum_charge, Amount::from_cents(500));
    assert_eq!(cfg.default_strategy, StrategyKind::HandicapPriority);
}

#[test]
fn test_from_vars_rejects_bad_values() {
    assert!(FacilityConfig::from_vars("LOT1", None, None, None).is_err());
    assert!(FacilityConfig::from_vars("LOT1:ten", None, None, None).is_err());
    assert!(FacilityConfig::from_vars("LOT1:10", Some("abc"), None, None).is_err());
    assert!(FacilityConfig::from_vars("LOT1:10", None, None, Some("random")).is_err());
    assert!(FacilityConfig::from_vars("", None, None, None).is_err());
}

#[test]
fn test_strategy_kind_parsing() {
    assert_eq!("first".parse::<StrategyKind>().unwrap(), StrategyKind::FirstAvailable);
    assert_eq!("Even-Distribution".parse::<StrategyKind>().unwrap(), StrategyKind::EvenDistribution);
    assert_eq!("smart".parse::<StrategyKind>().unwrap(), StrategyKind::Smart);
}
