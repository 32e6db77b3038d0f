//! Configuration loading and representation.

use std::net::SocketAddr;

use thiserror::Error;

use medstock_inventory::{DEFAULT_MIN_QUANTITY_THRESHOLD, ExpiryHorizon};
use medstock_observability::LogFormat;

pub const BIND_ADDR_VAR: &str = "MEDSTOCK_BIND_ADDR";
pub const EXPIRY_HORIZON_VAR: &str = "MEDSTOCK_EXPIRY_HORIZON_DAYS";
pub const DEFAULT_THRESHOLD_VAR: &str = "MEDSTOCK_DEFAULT_THRESHOLD";
pub const LOG_FORMAT_VAR: &str = "MEDSTOCK_LOG_FORMAT";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Process configuration, read from `MEDSTOCK_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Look-ahead used by dashboard and alerts when a request does not give one.
    pub expiry_horizon: ExpiryHorizon,
    /// Threshold applied to new records that do not carry their own.
    pub default_threshold: i64,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8001)),
            expiry_horizon: ExpiryHorizon::default(),
            default_threshold: DEFAULT_MIN_QUANTITY_THRESHOLD,
            log_format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset or blank keys take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let bind_addr = match get(BIND_ADDR_VAR) {
            Some(raw) => parse(BIND_ADDR_VAR, &raw)?,
            None => defaults.bind_addr,
        };

        let expiry_horizon = match get(EXPIRY_HORIZON_VAR) {
            Some(raw) => ExpiryHorizon::days(parse(EXPIRY_HORIZON_VAR, &raw)?),
            None => defaults.expiry_horizon,
        };

        let default_threshold = match get(DEFAULT_THRESHOLD_VAR) {
            Some(raw) => {
                let value: i64 = parse(DEFAULT_THRESHOLD_VAR, &raw)?;
                if value < 0 {
                    return Err(invalid(DEFAULT_THRESHOLD_VAR, &raw, "must be >= 0"));
                }
                value
            }
            None => defaults.default_threshold,
        };

        let log_format = match get(LOG_FORMAT_VAR) {
            Some(raw) => parse(LOG_FORMAT_VAR, &raw)?,
            None => defaults.log_format,
        };

        Ok(Self {
            bind_addr,
            expiry_horizon,
            default_threshold,
            log_format,
        })
    }
}

fn parse<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: core::str::FromStr,
    T::Err: core::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| invalid(key, raw, &e.to_string()))
}

fn invalid(key: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
