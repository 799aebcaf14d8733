//! Application configuration module
//!
//! Provides the configuration for the identity core and the server, loaded
//! from environment variables or assembled with `AppConfig::builder()`.
//!
//! # Environment Variables
//!
//! | Variable            | Default      | Meaning                                   |
//! |---------------------|--------------|-------------------------------------------|
//! | `APP_ENV`           | development  | `production` selects `JWT_SECRET`         |
//! | `JWT_SECRET`        | -            | Signing secret, required in production    |
//! | `JWT_DEV_SECRET`    | `dev-secret` | Signing secret everywhere else            |
//! | `BCRYPT_COST`       | 10           | bcrypt work factor                        |
//! | `TOKEN_TTL_DAYS`    | 7            | Session token lifetime, 1-3650            |
//! | `STORE_TIMEOUT_MS`  | -            | Per-call store time limit                 |
//! | `SERVER_PORT`       | 3000         | Listen port                               |
//! | `DATABASE_URL`      | -            | Postgres URL; in-memory store when unset  |
//!
//! # Secret Selection
//!
//! Exactly one secret is active. It is chosen here, once, from the
//! environment flag, and the same secret both signs and verifies.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::identity::password::{PasswordHasher, DEFAULT_COST, MAX_COST, MIN_COST};
use crate::identity::sessions::{Clock, TokenService, DEFAULT_TOKEN_TTL_DAYS};

/// Non-production signing secret used when `JWT_DEV_SECRET` is unset
pub const DEFAULT_DEV_SECRET: &str = "dev-secret";

/// Default listen port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Longest accepted session lifetime, in days
pub const MAX_TOKEN_TTL_DAYS: i64 = 3650;

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Production,
    #[default]
    Development,
}

impl Environment {
    /// Parse an `APP_ENV` value; anything but `production` is development
    pub fn from_flag(flag: &str) -> Self {
        if flag.trim().eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Development
        }
    }
}

/// Application configuration
#[derive(Clone)]
pub struct AppConfig {
    pub environment: Environment,
    /// Production signing secret
    pub jwt_secret: Option<String>,
    /// Non-production signing secret
    pub dev_jwt_secret: String,
    pub bcrypt_cost: u32,
    pub token_ttl_days: i64,
    pub store_timeout: Option<Duration>,
    pub server_port: u16,
    pub database_url: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("environment", &self.environment)
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("dev_jwt_secret", &"<redacted>")
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("token_ttl_days", &self.token_ttl_days)
            .field("store_timeout", &self.store_timeout)
            .field("server_port", &self.server_port)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            jwt_secret: None,
            dev_jwt_secret: DEFAULT_DEV_SECRET.to_string(),
            bcrypt_cost: DEFAULT_COST,
            token_ttl_days: DEFAULT_TOKEN_TTL_DAYS,
            store_timeout: None,
            server_port: DEFAULT_SERVER_PORT,
            database_url: None,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let config = Self {
            environment: get("APP_ENV")
                .map(|flag| Environment::from_flag(&flag))
                .unwrap_or_default(),
            jwt_secret: get("JWT_SECRET"),
            dev_jwt_secret: get("JWT_DEV_SECRET").unwrap_or(defaults.dev_jwt_secret),
            bcrypt_cost: parse_or(get("BCRYPT_COST"), "BCRYPT_COST", defaults.bcrypt_cost)?,
            token_ttl_days: parse_or(get("TOKEN_TTL_DAYS"), "TOKEN_TTL_DAYS", defaults.token_ttl_days)?,
            store_timeout: get("STORE_TIMEOUT_MS")
                .map(|raw| parse::<u64>(&raw, "STORE_TIMEOUT_MS").map(Duration::from_millis))
                .transpose()?,
            server_port: parse_or(get("SERVER_PORT"), "SERVER_PORT", defaults.server_port)?,
            database_url: get("DATABASE_URL"),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_COST..=MAX_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: self.bcrypt_cost.to_string(),
            });
        }

        if !(1..=MAX_TOKEN_TTL_DAYS).contains(&self.token_ttl_days) {
            return Err(ConfigError::InvalidValue {
                key: "TOKEN_TTL_DAYS",
                value: self.token_ttl_days.to_string(),
            });
        }

        if self.dev_jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("JWT_DEV_SECRET"));
        }

        if self.environment == Environment::Production {
            match self.jwt_secret.as_deref() {
                None | Some("") => return Err(ConfigError::MissingValue("JWT_SECRET")),
                Some(secret) if secret == self.dev_jwt_secret => {
                    return Err(ConfigError::SharedSecret)
                }
                Some(_) => {}
            }
        }

        Ok(())
    }

    /// The secret that signs and verifies tokens in this environment
    pub fn signing_secret(&self) -> Result<&str, ConfigError> {
        match self.environment {
            Environment::Production => self
                .jwt_secret
                .as_deref()
                .filter(|secret| !secret.is_empty())
                .ok_or(ConfigError::MissingValue("JWT_SECRET")),
            Environment::Development => Ok(&self.dev_jwt_secret),
        }
    }

    pub fn token_ttl(&self) -> Result<chrono::Duration, ConfigError> {
        chrono::Duration::try_days(self.token_ttl_days)
            .filter(|_| (1..=MAX_TOKEN_TTL_DAYS).contains(&self.token_ttl_days))
            .ok_or_else(|| ConfigError::InvalidValue {
                key: "TOKEN_TTL_DAYS",
                value: self.token_ttl_days.to_string(),
            })
    }

    pub fn password_hasher(&self) -> Result<PasswordHasher, ConfigError> {
        PasswordHasher::new(self.bcrypt_cost).map_err(|_| ConfigError::InvalidValue {
            key: "BCRYPT_COST",
            value: self.bcrypt_cost.to_string(),
        })
    }

    pub fn token_service(&self, clock: Arc<dyn Clock>) -> Result<TokenService, ConfigError> {
        let secret = self.signing_secret()?;
        Ok(TokenService::new(secret.as_bytes(), self.token_ttl()?, clock))
    }
}

fn parse<T: std::str::FromStr>(raw: &str, key: &'static str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

fn parse_or<T: std::str::FromStr>(
    raw: Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(raw) => parse(&raw, key),
        None => Ok(default),
    }
}

/// Builder for AppConfig
#[derive(Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    pub fn environment(mut self, environment: Environment) -> Self {
        self.config.environment = environment;
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.jwt_secret = Some(secret.into());
        self
    }

    pub fn dev_jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.dev_jwt_secret = secret.into();
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.config.bcrypt_cost = cost;
        self
    }

    pub fn token_ttl_days(mut self, days: i64) -> Self {
        self.config.token_ttl_days = days;
        self
    }

    pub fn store_timeout(mut self, limit: Duration) -> Self {
        self.config.store_timeout = Some(limit);
        self
    }

    pub fn server_port(mut self, port: u16) -> Self {
        self.config.server_port = port;
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database_url = Some(url.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("production and development signing secrets must differ")]
    SharedSecret,
}
