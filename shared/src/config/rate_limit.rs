//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

use super::parse_or;
use crate::errors::ConfigError;

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Minimum seconds between two codes issued to the same phone number
    pub send_code_cooldown_seconds: i64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            send_code_cooldown_seconds: 60,
        }
    }
}

impl RateLimitConfig {
    /// Read `SMS_COOLDOWN_SECONDS`
    pub fn from_vars<F>(get: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            send_code_cooldown_seconds: parse_or(
                get,
                "SMS_COOLDOWN_SECONDS",
                defaults.send_code_cooldown_seconds,
            )?,
        })
    }
}
