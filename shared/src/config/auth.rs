//! Session token and cookie configuration

use serde::{Deserialize, Serialize};

use super::{non_empty, parse_or, Environment};
use crate::errors::ConfigError;

const DEVELOPMENT_SECRET: &str = "scoreboard-development-secret-change-me";

/// Session configuration shared by the token issuer and the cookie writer
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// HMAC secret used to sign session tokens
    #[serde(skip_serializing)]
    pub jwt_secret: String,

    /// Session lifetime in seconds
    pub ttl_seconds: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,

    /// Name of the session cookie
    pub cookie_name: String,

    /// Mark the cookie `Secure`
    pub secure_cookie: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::from(DEVELOPMENT_SECRET),
            ttl_seconds: 7 * 24 * 60 * 60,
            issuer: String::from("scoreboard"),
            audience: String::from("scoreboard-web"),
            cookie_name: String::from("sports-auth-token"),
            secure_cookie: false,
        }
    }
}

impl SessionConfig {
    /// Create a session configuration with the given secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: secret.into(),
            ..Default::default()
        }
    }

    /// Read `JWT_SECRET` and `SESSION_TTL_SECONDS`.
    ///
    /// Production refuses to start without a secret; other modes fall back to
    /// a fixed development secret.
    pub fn from_vars<F>(get: &F, env: Environment) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let jwt_secret = match non_empty(get, "JWT_SECRET") {
            Some(secret) => secret,
            None if env.is_production() => {
                return Err(ConfigError::Missing("JWT_SECRET".to_string()))
            }
            None => defaults.jwt_secret.clone(),
        };

        Ok(Self {
            jwt_secret,
            ttl_seconds: parse_or(get, "SESSION_TTL_SECONDS", defaults.ttl_seconds)?,
            secure_cookie: env.is_production(),
            ..defaults
        })
    }

    /// Check if using the development secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.jwt_secret == DEVELOPMENT_SECRET
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_support::vars;

    #[test]
    fn test_production_requires_secret() {
        let err = SessionConfig::from_vars(&vars(&[]), Environment::Production).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ref key) if key == "JWT_SECRET"));
    }

    #[test]
    fn test_development_falls_back_to_default_secret() {
        let config = SessionConfig::from_vars(&vars(&[]), Environment::Development).unwrap();
        assert!(config.is_using_default_secret());
        assert!(!config.secure_cookie);
        assert_eq!(config.ttl_seconds, 604_800);
        assert_eq!(config.cookie_name, "sports-auth-token");
    }

    #[test]
    fn test_production_cookie_is_secure() {
        let get = vars(&[("JWT_SECRET", "a-long-production-secret")]);
        let config = SessionConfig::from_vars(&get, Environment::Production).unwrap();
        assert!(config.secure_cookie);
        assert!(!config.is_using_default_secret());
    }
}
