//! Process configuration read from environment variables.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://hope.db?mode=rwc";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3030";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_QUERY_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{key} has invalid value {value:?}")]
pub struct ConfigValueError {
    pub key: &'static str,
    pub value: String,
}

/// API runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
    pub query_timeout: Duration,
    /// Insert the reference dataset on startup.
    pub seed_database: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            query_timeout: Duration::from_millis(DEFAULT_QUERY_TIMEOUT_MS),
            seed_database: true,
        }
    }
}

impl ApiConfig {
    /// Read `DATABASE_URL`, `BIND_ADDR`, `DB_MAX_CONNECTIONS`, `QUERY_TIMEOUT_MS` and
    /// `SEED_DATABASE`. Missing or invalid values fall back to defaults with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| {
            tracing::warn!("DATABASE_URL not set; using {DEFAULT_DATABASE_URL}");
            defaults.database_url.clone()
        });
        let bind_addr = lookup("BIND_ADDR").unwrap_or(defaults.bind_addr);

        let max_connections = parse_or(
            "DB_MAX_CONNECTIONS",
            lookup("DB_MAX_CONNECTIONS"),
            defaults.max_connections,
        );
        let timeout_ms = parse_or(
            "QUERY_TIMEOUT_MS",
            lookup("QUERY_TIMEOUT_MS"),
            DEFAULT_QUERY_TIMEOUT_MS,
        );
        let seed_database = match lookup("SEED_DATABASE") {
            Some(raw) => parse_bool("SEED_DATABASE", &raw).unwrap_or_else(|e| {
                tracing::warn!("{e}; using {}", defaults.seed_database);
                defaults.seed_database
            }),
            None => defaults.seed_database,
        };

        Self {
            database_url,
            bind_addr,
            max_connections,
            query_timeout: Duration::from_millis(timeout_ms),
            seed_database,
        }
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> T
where
    T: FromStr + core::fmt::Display,
{
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse() {
        Ok(v) => v,
        Err(_) => {
            let err = ConfigValueError { key, value: raw };
            tracing::warn!("{err}; using {default}");
            default
        }
    }
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigValueError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigValueError {
            key,
            value: raw.to_string(),
        }),
    }
}
