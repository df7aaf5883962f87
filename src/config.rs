use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Application-level constants
pub const APP_NAME: &str = "StatusVault";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Days before expiry at which a document counts as expiring soon.
pub const EXPIRY_WARNING_DAYS: i64 = 30;

/// Widest accepted warning window, about ten years.
pub const MAX_WARNING_DAYS: i64 = 3650;

/// Environment override for the expiry warning window.
pub const WARNING_DAYS_ENV: &str = "STATUSVAULT_WARNING_DAYS";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "statusvault=info,statusvault_lib=info"
}

/// Install the global fmt subscriber. `RUST_LOG` wins over `fallback`.
pub fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Tunables for the lifecycle and timeline engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// Width of the ExpiringSoon horizon, and the offset of the timeline's
    /// expiration warning before expiry.
    pub warning_days: i64,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            warning_days: EXPIRY_WARNING_DAYS,
        }
    }
}

impl VaultConfig {
    /// Defaults, overridden by `STATUSVAULT_WARNING_DAYS` when it holds a
    /// whole number of days in `1..=MAX_WARNING_DAYS`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(WARNING_DAYS_ENV) {
            match parse_warning_days(&raw) {
                Some(days) => config.warning_days = days,
                None => tracing::warn!(
                    value = %raw,
                    "Ignoring invalid {WARNING_DAYS_ENV}, keeping {} days",
                    config.warning_days
                ),
            }
        }
        config
    }

    pub fn with_warning_days(mut self, days: i64) -> Self {
        self.warning_days = days;
        self
    }

    /// `warning_days` as a duration, clamped to `0..=MAX_WARNING_DAYS`.
    pub fn warning_window(&self) -> Duration {
        Duration::days(self.warning_days.clamp(0, MAX_WARNING_DAYS))
    }
}

fn parse_warning_days(raw: &str) -> Option<i64> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|d| (1..=MAX_WARNING_DAYS).contains(d))
}
