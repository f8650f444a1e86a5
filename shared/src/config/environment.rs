//! Environment configuration module

use serde::{Deserialize, Serialize};

use super::non_empty;

/// Application environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    Development,
    /// Staging/test environment
    Staging,
    /// Production environment
    Production,
}

impl Environment {
    /// Check if running in production
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Check if running in development
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    /// Get environment from the process environment
    pub fn from_env() -> Self {
        Self::from_vars(&|key: &str| std::env::var(key).ok())
    }

    /// Resolve the environment from `APP_ENV`, then `ENVIRONMENT`, then `RUST_ENV`.
    ///
    /// Unset or unrecognised values resolve to production so that nothing
    /// development-only (such as echoing verification codes) leaks by accident.
    pub fn from_vars<F>(get: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        ["APP_ENV", "ENVIRONMENT", "RUST_ENV"]
            .iter()
            .find_map(|key| non_empty(get, key))
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(Environment::Production)
    }

    /// Check if debug mode should be enabled
    pub fn is_debug(&self) -> bool {
        !self.is_production()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Production
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" | "test" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set
    pub level: String,

    /// Log format (json, pretty)
    pub format: LogFormat,

    /// Include source location in logs
    #[serde(default)]
    pub source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl LoggingConfig {
    /// Create logging config for environment
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self {
                level: String::from("debug,sqlx=info"),
                format: LogFormat::Pretty,
                source_location: true,
            },
            Environment::Staging => Self {
                level: String::from("info"),
                format: LogFormat::Json,
                source_location: false,
            },
            Environment::Production => Self {
                level: String::from("info,sqlx=warn"),
                format: LogFormat::Json,
                source_location: false,
            },
        }
    }

    /// Environment defaults, overridable through `LOG_LEVEL` and `LOG_FORMAT`
    pub fn from_vars<F>(get: &F, env: Environment) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::for_environment(env);
        if let Some(level) = non_empty(get, "LOG_LEVEL") {
            config.level = level;
        }
        match non_empty(get, "LOG_FORMAT").as_deref() {
            Some("json") => config.format = LogFormat::Json,
            Some("pretty") => config.format = LogFormat::Pretty,
            _ => {}
        }
        config
    }
}

/// Log format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_support::vars;

    #[test]
    fn test_environment_from_str() {
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("staging".parse::<Environment>().unwrap(), Environment::Staging);
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);
        assert!("invalid".parse::<Environment>().is_err());
    }

    #[test]
    fn test_environment_defaults_to_production() {
        assert_eq!(Environment::from_vars(&vars(&[])), Environment::Production);
        assert_eq!(
            Environment::from_vars(&vars(&[("APP_ENV", "bogus")])),
            Environment::Production
        );
    }

    #[test]
    fn test_environment_variable_precedence() {
        let get = vars(&[("APP_ENV", "development"), ("RUST_ENV", "production")]);
        assert_eq!(Environment::from_vars(&get), Environment::Development);

        let get = vars(&[("RUST_ENV", "staging")]);
        assert_eq!(Environment::from_vars(&get), Environment::Staging);
    }

    #[test]
    fn test_logging_config_for_environment() {
        let dev_log = LoggingConfig::for_environment(Environment::Development);
        assert_eq!(dev_log.format, LogFormat::Pretty);
        assert!(dev_log.source_location);

        let prod_log = LoggingConfig::for_environment(Environment::Production);
        assert_eq!(prod_log.format, LogFormat::Json);
        assert!(!prod_log.source_location);
    }

    #[test]
    fn test_logging_overrides() {
        let get = vars(&[("LOG_LEVEL", "trace"), ("LOG_FORMAT", "pretty")]);
        let config = LoggingConfig::from_vars(&get, Environment::Production);
        assert_eq!(config.level, "trace");
        assert_eq!(config.format, LogFormat::Pretty);
    }
}
