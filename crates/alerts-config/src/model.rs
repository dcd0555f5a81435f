use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

/// Scheduling and presentation settings for one alert session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertConfig {
    #[serde(default = "AlertConfig::default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "AlertConfig::default_motivational_delay_secs")]
    pub motivational_delay_secs: u64,
    #[serde(default = "AlertConfig::default_persist_timeout_secs")]
    pub persist_timeout_secs: u64,
    #[serde(default = "AlertConfig::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "AlertConfig::default_locale")]
    pub locale: String,
    #[serde(default)]
    pub preferences: NotificationPreferences,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom root for budget, transaction and notification files.
    pub data_root: Option<PathBuf>,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: Self::default_poll_interval_secs(),
            motivational_delay_secs: Self::default_motivational_delay_secs(),
            persist_timeout_secs: Self::default_persist_timeout_secs(),
            currency_symbol: Self::default_currency_symbol(),
            locale: Self::default_locale(),
            preferences: NotificationPreferences::default(),
            data_root: None,
        }
    }
}

impl AlertConfig {
    pub fn default_poll_interval_secs() -> u64 {
        15
    }

    pub fn default_motivational_delay_secs() -> u64 {
        8
    }

    pub fn default_persist_timeout_secs() -> u64 {
        5
    }

    pub fn default_currency_symbol() -> String {
        "₹".into()
    }

    pub fn default_locale() -> String {
        "en-IN".into()
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn motivational_delay(&self) -> Duration {
        Duration::from_secs(self.motivational_delay_secs.max(1))
    }

    pub fn persist_timeout(&self) -> Duration {
        Duration::from_secs(self.persist_timeout_secs.max(1))
    }

    pub fn resolve_data_root(&self) -> PathBuf {
        if let Some(path) = &self.data_root {
            return path.clone();
        }

        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("budget-alerts")
    }
}

/// Per-user switches for each notification family.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationPreferences {
    #[serde(default = "default_true")]
    pub budget_alerts: bool,
    #[serde(default = "default_true")]
    pub motivational: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            budget_alerts: true,
            motivational: true,
        }
    }
}

fn default_true() -> bool {
    true
}
