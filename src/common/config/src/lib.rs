//! Configuration management for Folio.
//!
//! Provides runtime configuration for the record store and logging.

use std::str::FromStr;

use common_error::{FolioError, FolioResult};
use serde::{Deserialize, Serialize};

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
pub mod python;

/// Environment variable holding the memory budget in bytes.
pub const ENV_MEMORY_LIMIT: &str = "FOLIO_MEMORY_LIMIT";
/// Environment variable holding the maximum records per collection.
pub const ENV_MAX_RECORDS: &str = "FOLIO_MAX_RECORDS";
/// Environment variable holding the log level.
pub const ENV_LOG_LEVEL: &str = "FOLIO_LOG_LEVEL";

/// Global Folio configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "python", pyclass)]
#[serde(default)]
pub struct FolioConfig {
    /// Record store configuration.
    pub store: StoreConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl FolioConfig {
    /// Parse a configuration from JSON. Missing sections take their defaults.
    pub fn from_json(json: &str) -> FolioResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a configuration from the defaults overridden by `FOLIO_*`
    /// environment variables.
    pub fn from_env() -> FolioResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> FolioResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENV_MEMORY_LIMIT) {
            config.store.memory_limit = Some(parse_var(ENV_MEMORY_LIMIT, &raw)?);
        }
        if let Some(raw) = lookup(ENV_MAX_RECORDS) {
            config.store.max_records = Some(parse_var(ENV_MAX_RECORDS, &raw)?);
        }
        if let Some(raw) = lookup(ENV_LOG_LEVEL) {
            config.logging.level = parse_var(ENV_LOG_LEVEL, &raw)?;
        }
        log::debug!("loaded configuration: {config:?}");
        Ok(config)
    }
}

fn parse_var<T: FromStr>(key: &str, raw: &str) -> FolioResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| FolioError::invalid_argument(format!("{key}: cannot parse {raw:?}")))
}

/// Record store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StoreConfig {
    /// Memory budget in bytes shared by all live collections (None = unlimited).
    pub memory_limit: Option<usize>,
    /// Maximum number of records in a single collection (None = unlimited).
    pub max_records: Option<usize>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is not set.
    pub level: LogLevel,
}

/// Log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Level name as accepted by `env_logger` filters.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Convert to a `log` filter.
    pub fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl FromStr for LogLevel {
    type Err = FolioError;

    fn from_str(s: &str) -> FolioResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(LogLevel::Off),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(FolioError::invalid_argument(format!(
                "unknown log level {other:?}"
            ))),
        }
    }
}
