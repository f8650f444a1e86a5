//! Server configuration module

use serde::{Deserialize, Serialize};

use super::{non_empty, parse_or};
use crate::errors::ConfigError;

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Worker threads (0 = number of CPU cores)
    pub workers: usize,

    /// Origins allowed by CORS; empty means same-origin only
    pub allowed_origins: Vec<String>,

    /// Maximum JSON payload size in bytes
    pub max_payload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8080,
            workers: 0,
            allowed_origins: Vec::new(),
            max_payload_size: 16 * 1024,
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Read `SERVER_HOST`, `SERVER_PORT`, `SERVER_WORKERS` and `ALLOWED_ORIGINS`
    pub fn from_vars<F>(get: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let allowed_origins = non_empty(get, "ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host: non_empty(get, "SERVER_HOST").unwrap_or(defaults.host),
            port: parse_or(get, "SERVER_PORT", defaults.port)?,
            workers: parse_or(get, "SERVER_WORKERS", defaults.workers)?,
            allowed_origins,
            max_payload_size: defaults.max_payload_size,
        })
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_support::vars;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.workers, 0);
        assert!(config.allowed_origins.is_empty());
    }

    #[test]
    fn test_server_config_from_vars() {
        let get = vars(&[
            ("SERVER_HOST", "127.0.0.1"),
            ("SERVER_PORT", "3001"),
            ("ALLOWED_ORIGINS", "https://scores.example.com, http://localhost:3000,"),
        ]);
        let config = ServerConfig::from_vars(&get).unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:3001");
        assert_eq!(
            config.allowed_origins,
            vec!["https://scores.example.com", "http://localhost:3000"]
        );
    }
}
