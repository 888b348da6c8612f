//! Configuration management
//!
//! Compatible with the mobile app settings.json format:
//! ```json
//! {
//!   "app": { "demoMode": false, ... },
//!   "cash": { "windowDays": 30, ... }
//! }
//! ```
//! Keys the CLI does not manage are preserved on save.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Raw settings.json structure (matching the app format)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
    #[serde(default)]
    cash: CashSettingsFile,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default)]
    demo_mode: bool,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CashSettingsFile {
    #[serde(default)]
    window_days: Option<u32>,
    #[serde(default)]
    min_days_since_withdrawal: Option<i64>,
    #[serde(default)]
    history_days: Option<u32>,
    #[serde(default)]
    suggestion_limit: Option<usize>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Cash reconciliation tuning
#[derive(Debug, Clone)]
pub struct CashSettings {
    /// Reconciliation window for the cash position
    pub window_days: u32,
    /// Minimum days since the last withdrawal before nudging
    pub min_days_since_withdrawal: i64,
    /// History window feeding the suggestion ranker
    pub history_days: u32,
    /// Number of ranked suggestions returned
    pub suggestion_limit: usize,
}

impl Default for CashSettings {
    fn default() -> Self {
        Self {
            window_days: 30,
            min_days_since_withdrawal: 3,
            history_days: 90,
            suggestion_limit: 4,
        }
    }
}

/// Centime configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    pub demo_mode: bool,
    pub cash: CashSettings,
    // Keep the raw settings for preservation when saving
    _raw_settings: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            demo_mode: false,
            cash: CashSettings::default(),
            _raw_settings: SettingsFile::default(),
        }
    }
}

impl Config {
    /// Load config from the centime directory
    ///
    /// Demo mode can be enabled via:
    /// 1. Settings file (ct demo on)
    /// 2. Environment variable CENTIME_DEMO_MODE (for CI/testing)
    pub fn load(centime_dir: &Path) -> Result<Self> {
        let settings_path = centime_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        // Check env var for demo mode override (for CI/testing)
        let demo_mode = match std::env::var("CENTIME_DEMO_MODE").ok().as_deref() {
            Some("true" | "1" | "yes" | "TRUE" | "YES") => true,
            Some("false" | "0" | "no" | "FALSE" | "NO") => false,
            _ => raw.app.demo_mode,
        };

        let defaults = CashSettings::default();
        let cash = CashSettings {
            window_days: raw.cash.window_days.unwrap_or(defaults.window_days),
            min_days_since_withdrawal: raw
                .cash
                .min_days_since_withdrawal
                .unwrap_or(defaults.min_days_since_withdrawal),
            history_days: raw.cash.history_days.unwrap_or(defaults.history_days),
            suggestion_limit: raw.cash.suggestion_limit.unwrap_or(defaults.suggestion_limit),
        };

        Ok(Self {
            demo_mode,
            cash,
            _raw_settings: raw,
        })
    }

    /// Save config to the centime directory.
    /// Preserves settings that the CLI doesn't manage.
    pub fn save(&self, centime_dir: &Path) -> Result<()> {
        let settings_path = centime_dir.join("settings.json");

        // Load existing settings to preserve fields we don't manage
        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        // Update only the fields we manage
        settings.app.demo_mode = self.demo_mode;

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    pub fn enable_demo_mode(&mut self) {
        self.demo_mode = true;
    }

    pub fn disable_demo_mode(&mut self) {
        self.demo_mode = false;
    }
}
