//! Configuration module with business-specific sub-modules
//!
//! Every sub-configuration is built from environment variables through a
//! lookup function, so tests can feed a map instead of mutating the process
//! environment.
//!
//! - `auth` - Session token and cookie configuration
//! - `database` - Database connection and pool configuration
//! - `environment` - Deployment mode detection and logging configuration
//! - `rate_limit` - Send-code cooldown window
//! - `server` - HTTP server and CORS configuration
//! - `sms` - SMS provider credentials and delivery settings

pub mod auth;
pub mod database;
pub mod environment;
pub mod rate_limit;
pub mod server;
pub mod sms;

use std::str::FromStr;

use serde::Serialize;

use crate::errors::ConfigError;

// Re-export commonly used types
pub use auth::SessionConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use rate_limit::RateLimitConfig;
pub use server::ServerConfig;
pub use sms::{SmsConfig, TwilioConfig, TwilioCredentialFlags, MAX_TWILIO_ATTEMPTS};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Serialize)]
pub struct AppConfig {
    /// Deployment mode
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Session configuration
    pub session: SessionConfig,

    /// SMS delivery configuration
    pub sms: SmsConfig,

    /// Rate limiting configuration
    pub rate_limit: RateLimitConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_vars<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::from_vars(&get);

        Ok(Self {
            environment,
            server: ServerConfig::from_vars(&get)?,
            database: DatabaseConfig::from_vars(&get)?,
            session: SessionConfig::from_vars(&get, environment)?,
            sms: SmsConfig::from_vars(&get, environment)?,
            rate_limit: RateLimitConfig::from_vars(&get)?,
            logging: LoggingConfig::from_vars(&get, environment),
        })
    }
}

/// Read a variable, treating empty values as absent
pub(crate) fn non_empty<F>(get: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    get(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Read and parse a variable, falling back to `default` when unset
pub(crate) fn parse_or<F, T>(get: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match non_empty(get, key) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
            key: key.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}
