//! Runtime configuration read from the environment

use crate::{
    constants::{DEFAULT_NETWORK_DELAY_MS, ENV_FIXTURES_DIR, ENV_NETWORK_DELAY_MS, ENV_SUPPORT_EUR},
    error::ConfigError,
    flags::{FeatureFlag, FlagMap},
};
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory to read fixtures from instead of the bundled copies
    pub fixtures_dir: Option<PathBuf>,
    /// Simulated latency for every fixture load
    pub network_delay: Duration,
    /// Initial value of the EUR display flag
    pub support_eur: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fixtures_dir: None,
            network_delay: Duration::from_millis(DEFAULT_NETWORK_DELAY_MS),
            support_eur: false,
        }
    }
}

impl AppConfig {
    /// Reads configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup(ENV_FIXTURES_DIR).filter(|d| !d.trim().is_empty()) {
            config.fixtures_dir = Some(PathBuf::from(dir));
        }

        if let Some(raw) = lookup(ENV_NETWORK_DELAY_MS) {
            let millis = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::invalid_value(ENV_NETWORK_DELAY_MS, raw.clone()))?;
            config.network_delay = Duration::from_millis(millis);
        }

        if let Some(raw) = lookup(ENV_SUPPORT_EUR) {
            config.support_eur = parse_bool(&raw)
                .ok_or_else(|| ConfigError::invalid_value(ENV_SUPPORT_EUR, raw.clone()))?;
        }

        Ok(config)
    }

    /// Initial feature flag values implied by this configuration
    pub fn initial_flags(&self) -> FlagMap {
        FlagMap::from([(FeatureFlag::SupportEur, self.support_eur)])
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
