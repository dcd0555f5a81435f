use std::{fs, time::Duration};

use alerts_config::{AlertConfig, ConfigManager};
use tempfile::tempdir;

#[test]
fn default_config_matches_session_defaults() {
    let cfg = AlertConfig::default();

    assert_eq!(cfg.poll_interval(), Duration::from_secs(15));
    assert_eq!(cfg.motivational_delay(), Duration::from_secs(8));
    assert_eq!(cfg.currency_symbol, "₹");
    assert!(cfg.preferences.budget_alerts);
    assert!(cfg.preferences.motivational);
}

#[test]
fn config_manager_returns_defaults_when_missing() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let loaded = manager.load().expect("load config");
    assert_eq!(loaded, AlertConfig::default());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let mut cfg = AlertConfig::default();
    cfg.poll_interval_secs = 30;
    cfg.preferences.motivational = false;

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded.poll_interval_secs, 30);
    assert!(!loaded.preferences.motivational);
    assert!(manager.config_path().ends_with("config/config.json"));
}

#[test]
fn partial_files_fill_missing_fields_and_clamp_zero_intervals() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"poll_interval_secs": 0, "preferences": {"budget_alerts": false}}"#)
        .expect("write config");

    let loaded = ConfigManager::new(path).load().expect("load config");
    assert_eq!(loaded.poll_interval(), Duration::from_secs(1));
    assert!(!loaded.preferences.budget_alerts);
    assert!(loaded.preferences.motivational);
    assert_eq!(loaded.locale, "en-IN");
}

#[test]
fn malformed_file_reports_serde_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    fs::write(&path, "{not json").expect("write config");

    let err = ConfigManager::new(path).load().expect_err("should fail");
    assert!(err.to_string().starts_with("Serialization error"));
}
