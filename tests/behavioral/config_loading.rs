// ABOUTME: Behavioral tests for configuration defaults, layered files and env overrides

use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

use signup_wizard::config::AppConfig;
use signup_wizard::services::{AppServices, StorageMode};
use signup_wizard::storage::DEFAULT_SLOT;

/// Default config should work with no files present
#[test]
fn test_default_config_has_sensible_values() {
    let config = AppConfig::default();

    assert_eq!(config.version, env!("CARGO_PKG_VERSION"));
    assert!(config.storage.enabled);
    assert_eq!(config.storage.slot, DEFAULT_SLOT);
    assert_eq!(config.submission.delay(), Duration::from_millis(1500));
    assert!((config.submission.success_rate() - 0.9).abs() < f64::EPSILON);
    assert!(config.dialogs.confirm_reset);
    assert_eq!(config.ui.tick_rate(), Duration::from_millis(250));
}

#[test]
fn test_earlier_files_take_precedence_key_by_key() {
    let dir = TempDir::new().unwrap();
    let local = dir.path().join("local.toml");
    let user = dir.path().join("user.toml");

    std::fs::write(&local, "[submission]\nsuccess_rate = 1.0\n").unwrap();
    std::fs::write(
        &user,
        "[submission]\nsuccess_rate = 0.2\ndelay_ms = 10\n\n[storage]\nslot = \"user-slot\"\n",
    )
    .unwrap();

    let config =
        AppConfig::load_from_paths(&[local, user, dir.path().join("missing.toml")]).unwrap();
    assert!((config.submission.success_rate - 1.0).abs() < f64::EPSILON);
    assert_eq!(config.submission.delay_ms, 10);
    assert_eq!(config.storage.slot, "user-slot");
}

#[test]
fn test_invalid_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[storage\nslot = ").unwrap();

    assert!(AppConfig::load_from_paths(&[path]).is_err());
}

#[test]
fn test_env_overrides_and_bad_values_are_ignored() {
    let mut config = AppConfig::default();
    let vars: HashMap<String, String> = [
        ("SIGNUP_WIZARD_STATE_DIR", "/tmp/signup-state"),
        ("SIGNUP_WIZARD_SUBMIT_DELAY_MS", "not-a-number"),
        ("SIGNUP_WIZARD_SUCCESS_RATE", "4.5"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    config.apply_env(&vars);

    assert_eq!(config.storage.directory, Some(PathBuf::from("/tmp/signup-state")));
    assert_eq!(config.submission.delay_ms, 1500);
    assert!((config.submission.success_rate - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_saved_config_loads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = AppConfig::default();
    config.ui.show_progress_percent = false;
    config.dialogs.notice_auto_close_ms = 500;
    config.save_to(&path).unwrap();

    let loaded = AppConfig::load_from_paths(&[path]).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_configured_directory_is_used_for_storage() {
    let dir = TempDir::new().unwrap();
    let mut config = AppConfig::default();
    config.storage.directory = Some(dir.path().to_path_buf());
    config.storage.slot = "it-slot".to_string();

    let mut services = AppServices::init(&config, StorageMode::Configured).unwrap();
    services.wizard.update_data(signup_wizard::models::FormData {
        city: Some("Lima".into()),
        ..Default::default()
    });

    assert!(dir.path().join("it-slot.json").exists());
}
