//! Application configuration module
//!
//! Provides configuration types for the server. Values are read from the
//! process environment (after `dotenv` has loaded any `.env` file) and
//! validated before the server starts.
//!
//! # Environment
//!
//! - `SERVER_PORT` - listen port (default `3000`)
//! - `DATABASE_URL` - PostgreSQL URL; when unset the in-memory store is used
//! - `BCRYPT_COST` - bcrypt work factor (default `12`, range 4..=31)
//! - `TOKEN_TTL_SECONDS` - optional bearer token lifetime

use std::time::Duration;

use thiserror::Error;

/// Default listen port
pub const DEFAULT_PORT: u16 = 3000;

/// Default bcrypt work factor
pub const DEFAULT_BCRYPT_COST: u32 = 12;

const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server binds to on all interfaces
    pub port: u16,
    /// PostgreSQL connection URL
    pub database_url: Option<String>,
    /// bcrypt work factor used for new password hashes
    pub bcrypt_cost: u32,
    /// Lifetime of issued bearer tokens. `None` means tokens live until revoked.
    pub token_ttl: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: None,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            token_ttl: None,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load the configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut builder = Self::builder();

        if let Some(raw) = get("SERVER_PORT") {
            builder = builder.port(parse_value("SERVER_PORT", &raw)?);
        }
        if let Some(url) = get("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(raw) = get("BCRYPT_COST") {
            builder = builder.bcrypt_cost(parse_value("BCRYPT_COST", &raw)?);
        }
        if let Some(raw) = get("TOKEN_TTL_SECONDS") {
            let seconds: u64 = parse_value("TOKEN_TTL_SECONDS", &raw)?;
            builder = builder.token_ttl(Duration::from_secs(seconds));
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::OutOfRange {
                key: "BCRYPT_COST",
                value: self.bcrypt_cost.to_string(),
                expected: "4..=31",
            });
        }
        if self.token_ttl.is_some_and(|ttl| ttl.is_zero()) {
            return Err(ConfigError::OutOfRange {
                key: "TOKEN_TTL_SECONDS",
                value: "0".to_string(),
                expected: "a positive number of seconds",
            });
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    port: Option<u16>,
    database_url: Option<String>,
    bcrypt_cost: Option<u32>,
    token_ttl: Option<Duration>,
}

impl AppConfigBuilder {
    /// Set the listen port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the database URL
    pub fn database_url(mut self, url: String) -> Self {
        self.database_url = Some(url);
        self
    }

    /// Set the bcrypt work factor
    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    /// Set the bearer token lifetime
    pub fn token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = Some(ttl);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig {
            port: self.port.unwrap_or(DEFAULT_PORT),
            database_url: self.database_url,
            bcrypt_cost: self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST),
            token_ttl: self.token_ttl,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("{key}={value} is out of range, expected {expected}")]
    OutOfRange {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.bcrypt_cost, DEFAULT_BCRYPT_COST);
        assert!(config.database_url.is_none());
        assert!(config.token_ttl.is_none());
    }

    #[test]
    fn test_reads_all_values() {
        let config = AppConfig::from_lookup(lookup(&[
            ("SERVER_PORT", "8080"),
            ("DATABASE_URL", "postgres://localhost/reviews"),
            ("BCRYPT_COST", "10"),
            ("TOKEN_TTL_SECONDS", "3600"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/reviews"));
        assert_eq!(config.bcrypt_cost, 10);
        assert_eq!(config.token_ttl, Some(Duration::from_secs(3600)));
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "  ")])).unwrap();
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_invalid_port() {
        let result = AppConfig::from_lookup(lookup(&[("SERVER_PORT", "eighty")]));
        assert_matches!(result, Err(ConfigError::InvalidValue { key: "SERVER_PORT", .. }));
    }

    #[test]
    fn test_bcrypt_cost_out_of_range() {
        let result = AppConfig::from_lookup(lookup(&[("BCRYPT_COST", "2")]));
        assert_matches!(result, Err(ConfigError::OutOfRange { key: "BCRYPT_COST", .. }));
    }

    #[test]
    fn test_zero_token_ttl_rejected() {
        let result = AppConfig::builder().token_ttl(Duration::ZERO).build();
        assert_matches!(result, Err(ConfigError::OutOfRange { key: "TOKEN_TTL_SECONDS", .. }));
    }
}
