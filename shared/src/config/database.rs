//! Database configuration module

use serde::{Deserialize, Serialize};

use super::{non_empty, parse_or};
use crate::errors::ConfigError;

/// Database configuration for MySQL connections
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[serde(skip_serializing)]
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Connection acquire timeout in seconds
    pub connect_timeout: u64,

    /// Idle connection timeout in seconds
    pub idle_timeout: u64,

    /// Maximum lifetime of a connection in seconds
    pub max_lifetime: u64,

    /// Apply pending migrations at startup
    pub run_migrations: bool,

    /// Slow query threshold in milliseconds
    pub slow_query_threshold: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            connect_timeout: 30,
            idle_timeout: 600,
            max_lifetime: 1800,
            run_migrations: true,
            slow_query_threshold: 1000,
        }
    }
}

impl DatabaseConfig {
    /// Create from environment variables. `DATABASE_URL` is required.
    pub fn from_vars<F>(get: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let url = non_empty(get, "DATABASE_URL")
            .ok_or_else(|| ConfigError::Missing("DATABASE_URL".to_string()))?;

        Ok(Self {
            url,
            max_connections: parse_or(get, "DATABASE_MAX_CONNECTIONS", defaults.max_connections)?,
            connect_timeout: parse_or(get, "DATABASE_CONNECT_TIMEOUT", defaults.connect_timeout)?,
            run_migrations: parse_or(get, "DATABASE_RUN_MIGRATIONS", defaults.run_migrations)?,
            ..defaults
        })
    }

    /// Create a new database configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the maximum number of connections
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }
}
