//! Configuration for the verification service

use sb_shared::Environment;

use crate::domain::entities::verification_code::{DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS};

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Number of minutes before a verification code expires
    pub code_expiration_minutes: i64,
    /// Maximum number of verification attempts allowed
    pub max_attempts: i32,
    /// Return the literal code to the caller. Never set in production.
    pub expose_code: bool,
    /// Fresh codes to try when a generated code collides with a stored one
    pub max_generation_attempts: u32,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            max_attempts: MAX_ATTEMPTS,
            expose_code: false,
            max_generation_attempts: 5,
        }
    }
}

impl VerificationServiceConfig {
    /// Defaults for a deployment mode; codes are echoed outside production only
    pub fn for_environment(env: Environment) -> Self {
        Self {
            expose_code: !env.is_production(),
            ..Default::default()
        }
    }

    /// Code lifetime as a chrono duration
    pub fn code_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.code_expiration_minutes)
    }
}
