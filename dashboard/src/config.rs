//! Environment-based configuration.
//!
//! | Variable | Default |
//! |---|---|
//! | `DASHBOARD_API_URL` | `http://localhost:5173` |
//! | `DASHBOARD_SHUTDOWN_TIMEOUT_SECS` | `30` |
//! | `DASHBOARD_OFFLINE` | `false` |

use crate::api::DEFAULT_BASE_URL;
use dashboard_runtime::StoreConfig;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Base URL of the JSON endpoints
pub const API_URL_VAR: &str = "DASHBOARD_API_URL";
/// Shutdown timeout, in seconds
pub const SHUTDOWN_TIMEOUT_VAR: &str = "DASHBOARD_SHUTDOWN_TIMEOUT_SECS";
/// Serve the built-in fixtures instead of fetching
pub const OFFLINE_VAR: &str = "DASHBOARD_OFFLINE";

/// Configuration error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable could not be parsed
    #[error("Invalid value {value:?} for {var}: {reason}")]
    InvalidValue {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
        /// Parse failure
        reason: String,
    },

    /// Parsed values are inconsistent
    #[error("Configuration validation failed: {0}")]
    Validation(String),
}

/// Dashboard configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Base URL of `notifications.json` and `courses.json`
    pub api_base_url: String,
    /// Store tuning
    pub store: StoreConfig,
    /// Use built-in fixtures instead of the network
    pub offline: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            store: StoreConfig::default(),
            offline: false,
        }
    }
}

impl DashboardConfig {
    /// Load from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load using a custom variable lookup
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(API_URL_VAR) {
            config.api_base_url = url;
        }
        if let Some(secs) = parse_var::<u64>(&lookup, SHUTDOWN_TIMEOUT_VAR)? {
            config.store = config.store.with_shutdown_timeout(Duration::from_secs(secs));
        }
        if let Some(offline) = lookup(OFFLINE_VAR) {
            config.offline = parse_flag(&offline).ok_or_else(|| ConfigError::InvalidValue {
                var: OFFLINE_VAR,
                value: offline.clone(),
                reason: "expected true/false".to_string(),
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the parsed values
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] on the first inconsistent value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "api base url must be http(s), got {}",
                self.api_base_url
            )));
        }
        if self.store.shutdown_timeout.is_zero() {
            return Err(ConfigError::Validation(
                "shutdown timeout must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(var)
        .map(|value| {
            value.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
                var,
                value: value.clone(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
