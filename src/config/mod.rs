// ABOUTME: Configuration management for the signup wizard
// Layered TOML files (local, user, system) plus SIGNUP_WIZARD_* environment overrides

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::storage::{FileStateStore, DEFAULT_SLOT};

const ENV_PREFIX: &str = "SIGNUP_WIZARD_";
const ENV_STATE_DIR: &str = "SIGNUP_WIZARD_STATE_DIR";
const ENV_SUBMIT_DELAY_MS: &str = "SIGNUP_WIZARD_SUBMIT_DELAY_MS";
const ENV_SUCCESS_RATE: &str = "SIGNUP_WIZARD_SUCCESS_RATE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application version
    #[serde(default = "default_version")]
    pub version: String,

    /// Where wizard progress is kept
    #[serde(default)]
    pub storage: StorageConfig,

    /// Simulated backend behaviour
    #[serde(default)]
    pub submission: SubmissionConfig,

    /// Notices and confirmations shown by the app
    #[serde(default)]
    pub dialogs: DialogConfig,

    #[serde(default)]
    pub ui: UiPreferences,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Persist progress between runs
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// State directory, `~/.signup-wizard/state` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,

    /// Slot name; the file is `<slot>.json`
    #[serde(default = "default_slot")]
    pub slot: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: None,
            slot: default_slot(),
        }
    }
}

impl StorageConfig {
    /// Resolved state directory
    pub fn state_dir(&self) -> Result<PathBuf> {
        match &self.directory {
            Some(directory) => Ok(directory.clone()),
            None => FileStateStore::default_dir(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionConfig {
    /// Artificial backend latency
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Probability that a submission succeeds (0.0..=1.0)
    #[serde(default = "default_success_rate")]
    pub success_rate: f64,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            success_rate: default_success_rate(),
        }
    }
}

impl SubmissionConfig {
    pub const fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn success_rate(&self) -> f64 {
        self.success_rate.clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogConfig {
    /// Auto-close delay for informational notices
    #[serde(default = "default_notice_auto_close_ms")]
    pub notice_auto_close_ms: u64,

    /// Ask before discarding progress
    #[serde(default = "default_true")]
    pub confirm_reset: bool,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            notice_auto_close_ms: default_notice_auto_close_ms(),
            confirm_reset: true,
        }
    }
}

impl DialogConfig {
    pub const fn notice_auto_close(&self) -> Duration {
        Duration::from_millis(self.notice_auto_close_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiPreferences {
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    #[serde(default = "default_true")]
    pub show_progress_percent: bool,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            show_progress_percent: true,
        }
    }
}

impl UiPreferences {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_slot() -> String {
    DEFAULT_SLOT.to_string()
}

fn default_delay_ms() -> u64 {
    1500
}

fn default_success_rate() -> f64 {
    0.9
}

fn default_notice_auto_close_ms() -> u64 {
    3000
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Load configuration from default locations, then apply the environment
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from_paths(&Self::get_config_paths())?;
        config.apply_env(&load_from_env());
        Ok(config)
    }

    /// Load and merge the given files; earlier paths take precedence
    pub fn load_from_paths(paths: &[PathBuf]) -> Result<Self> {
        let mut merged = toml::Table::new();

        // Lowest precedence first so higher layers overwrite
        for path in paths.iter().rev() {
            if !path.exists() {
                continue;
            }

            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            let layer: toml::Table = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?;

            debug!(path = %path.display(), "Loaded config layer");
            merge_tables(&mut merged, layer);
        }

        let config: Self = toml::Value::Table(merged)
            .try_into()
            .context("Invalid configuration")?;
        Ok(config)
    }

    /// Save configuration to user config directory
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::get_user_config_dir()?;
        self.save_to(&config_dir.join("config.toml"))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Apply `SIGNUP_WIZARD_*` overrides; unparsable values are ignored
    pub fn apply_env(&mut self, vars: &HashMap<String, String>) {
        if let Some(dir) = vars.get(ENV_STATE_DIR).filter(|v| !v.is_empty()) {
            self.storage.directory = Some(PathBuf::from(dir));
        }

        if let Some(raw) = vars.get(ENV_SUBMIT_DELAY_MS) {
            match raw.parse::<u64>() {
                Ok(delay_ms) => self.submission.delay_ms = delay_ms,
                Err(e) => warn!("Ignoring {}={:?}: {}", ENV_SUBMIT_DELAY_MS, raw, e),
            }
        }

        if let Some(raw) = vars.get(ENV_SUCCESS_RATE) {
            match raw.parse::<f64>() {
                Ok(rate) if rate.is_finite() => self.submission.success_rate = rate.clamp(0.0, 1.0),
                Ok(_) => warn!("Ignoring non-finite {}={:?}", ENV_SUCCESS_RATE, raw),
                Err(e) => warn!("Ignoring {}={:?}: {}", ENV_SUCCESS_RATE, raw, e),
            }
        }
    }

    /// Get configuration file paths in order of precedence
    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        // 1. Local project config
        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd.join(".signup-wizard").join("config.toml"));
        }

        // 2. User config (~/.signup-wizard/config/config.toml)
        if let Ok(config_dir) = Self::get_user_config_dir() {
            paths.push(config_dir.join("config.toml"));
        }

        // 3. System config
        paths.push(PathBuf::from("/etc/signup-wizard/config.toml"));

        paths
    }

    fn get_user_config_dir() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to get home directory")?;
        Ok(home_dir.join(".signup-wizard").join("config"))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            storage: StorageConfig::default(),
            submission: SubmissionConfig::default(),
            dialogs: DialogConfig::default(),
            ui: UiPreferences::default(),
        }
    }
}

/// Deep-merge `overlay` into `base`; nested tables merge key by key
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// Load configuration from environment
pub fn load_from_env() -> HashMap<String, String> {
    std::env::vars().filter(|(k, _)| k.starts_with(ENV_PREFIX)).collect()
}
