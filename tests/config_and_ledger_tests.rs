mod common;

use std::path::PathBuf;

use airline_autopilot::config::AutopilotConfig;
use airline_autopilot::models::{AircraftStatus, ReferenceData};
use airline_autopilot::storage::ActionLedger;
use airline_autopilot::AutopilotError;
use chrono::{Duration, Utc};
use common::*;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("airline_autopilot_{}_{}", std::process::id(), name))
}

fn assert_config_error(config: &AutopilotConfig, what: &str) {
    match config.validate() {
        Err(AutopilotError::Config(message)) => println!("✅ Rejected {}: {}", what, message),
        other => panic!("Expected a config error for {}, got {:?}", what, other),
    }
}

#[test]
fn test_default_config_is_valid() {
    let config = AutopilotConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.resources.fuel.immediate_threshold, 400);
    assert_eq!(config.resources.co2.low_level_threshold, 140);
    assert_eq!(config.maintenance.check_lead_time_hours, 20);
    assert_eq!(config.discovery.page_ceiling, 500);
}

#[test]
fn test_invalid_values_fail_fast() {
    let mut config = AutopilotConfig::default();
    config.discovery.page_ceiling = 0;
    assert_config_error(&config, "page ceiling");

    let mut config = AutopilotConfig::default();
    config.passenger_fleet.safety_factor = 0.9;
    assert_config_error(&config, "safety factor");

    let mut config = AutopilotConfig::default();
    config.discovery.cargo_volume_ratio = 1.5;
    assert_config_error(&config, "volume ratio");

    let mut config = AutopilotConfig::default();
    config.resources.co2.immediate_threshold = 0;
    assert_config_error(&config, "co2 threshold");

    let mut config = AutopilotConfig::default();
    config.discovery.passenger_hours_per_day = 25.0;
    assert_config_error(&config, "hours per day");

    let mut config = AutopilotConfig::default();
    config.cargo_fleet.max_per_hub = Some(0);
    assert_config_error(&config, "per-hub cap");
}

#[test]
fn test_nan_values_fail_fast() {
    let mut config = AutopilotConfig::default();
    config.passenger_fleet.safety_factor = f64::NAN;
    assert_config_error(&config, "NaN safety factor");

    let mut config = AutopilotConfig::default();
    config.discovery.tolerance_factor = f64::NAN;
    assert_config_error(&config, "NaN tolerance");

    let mut config = AutopilotConfig::default();
    config.discovery.cargo_hours_per_day = f64::NAN;
    assert_config_error(&config, "NaN hours per day");

    let mut config = AutopilotConfig::default();
    config.discovery.first_class_floor_ratio = f64::NAN;
    assert_config_error(&config, "NaN floor ratio");

    let mut config = AutopilotConfig::default();
    config.cargo_fleet.planning_factor = f64::INFINITY;
    assert_config_error(&config, "infinite planning factor");
}

#[test]
fn test_nan_in_toml_is_rejected_on_load() {
    let path = temp_path("nan_config.toml");
    let path_str = path.to_string_lossy().to_string();
    let mut config = AutopilotConfig::default();
    config.passenger_fleet.safety_factor = f64::NAN;
    config.save(&path_str).expect("config should save");

    let loaded = AutopilotConfig::load_validated(&path_str);
    assert!(matches!(loaded, Err(AutopilotError::Config(_))));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_hub_quota() {
    let mut fleet = AutopilotConfig::default().passenger_fleet;
    assert_eq!(fleet.hub_quota(7), 7);
    fleet.max_per_hub = Some(3);
    assert_eq!(fleet.hub_quota(7), 3);
    assert_eq!(fleet.hub_quota(2), 2);
}

#[test]
fn test_config_created_then_reloaded() {
    let path = temp_path("config.toml");
    let path_str = path.to_string_lossy().to_string();
    let _ = std::fs::remove_file(&path);

    let created = AutopilotConfig::load_or_create(&path_str).expect("default config should be written");
    assert!(path.exists(), "load_or_create should write the defaults");

    let mut edited = created.clone();
    edited.passenger_fleet.model = "t100".to_string();
    edited.maintenance.excluded_models = vec!["a388".to_string()];
    edited.save(&path_str).expect("config should save");

    let reloaded = AutopilotConfig::load_validated(&path_str).expect("saved config should validate");
    assert_eq!(reloaded.passenger_fleet.model, "t100");
    assert!(reloaded.maintenance.is_excluded("A388"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_reference_data_validation() {
    let reference = reference_data();
    assert!(reference.validate().is_ok());
    assert_eq!(reference.model("T100").map(|m| m.id).ok(), Some(11));
    assert!(matches!(reference.model("missing"), Err(AutopilotError::Config(_))));
    assert_eq!(reference.airport("bbb").map(|a| a.id), Some(101));

    let missing = ReferenceData::load("/nonexistent/reference.toml");
    assert!(matches!(missing, Err(AutopilotError::Config(_))));
}

#[test]
fn test_ledger_reconciles_against_fleet() {
    let mut ledger = ActionLedger::in_memory();
    ledger.record_purchase("AAA-BBB", HUB, "t100");
    ledger.record_purchase("AAA-CCC", HUB, "t100");

    let fleet = vec![aircraft(9, "AAA-BBB", AircraftStatus::Parked)];
    assert_eq!(ledger.reconcile("t100", &fleet), 1);
    assert!(!ledger.is_pending("AAA-BBB"));
    assert!(ledger.is_pending("AAA-CCC"));
}

#[test]
fn test_ledger_keeps_models_apart() {
    let mut ledger = ActionLedger::in_memory();
    ledger.record_purchase("AAA-BBB", HUB, "t100");
    ledger.record_purchase("AAA-BBB", HUB, "t100f");
    assert_eq!(ledger.len(), 2);

    assert_eq!(ledger.pending_route_names("T100F").collect::<Vec<_>>(), vec!["AAA-BBB"]);
    assert!(ledger.pending_route_names("a388").next().is_none());

    let cargo_fleet = vec![aircraft(9, "AAA-BBB", AircraftStatus::Parked)];
    assert_eq!(ledger.reconcile("t100f", &cargo_fleet), 1);
    assert_eq!(ledger.pending_route_names("t100").collect::<Vec<_>>(), vec!["AAA-BBB"]);
    assert!(ledger.pending_route_names("t100f").next().is_none());
}

#[test]
fn test_ledger_entries_expire() {
    let now = Utc::now();
    let mut ledger = ActionLedger::in_memory();
    ledger.record_purchase_at("AAA-BBB", HUB, "t100", now - Duration::hours(7));
    ledger.record_purchase_at("AAA-CCC", HUB, "t100", now - Duration::hours(1));

    assert_eq!(ledger.cleanup_expired_at(now, 6), 1);
    assert_eq!(ledger.pending_route_names("t100").collect::<Vec<_>>(), vec!["AAA-CCC"]);
}

#[test]
fn test_ledger_persists_between_passes() {
    let path = temp_path("ledger.json");
    let path_str = path.to_string_lossy().to_string();
    let _ = std::fs::remove_file(&path);

    let mut ledger = ActionLedger::new(&path_str);
    assert!(ledger.is_empty());
    ledger.record_purchase("GGG-HHH", SECOND_HUB, "t100");
    ledger.save().expect("ledger should save");

    let reloaded = ActionLedger::new(&path_str);
    assert_eq!(reloaded.len(), 1);
    assert!(reloaded.is_pending("GGG-HHH"));

    let _ = std::fs::remove_file(&path);
}
