//! Verification code entity for SMS-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of verification attempts allowed
pub const MAX_ATTEMPTS: i32 = 3;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for verification codes (5 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 5;

/// Lifecycle state of a stored code, derived from its fields and the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeState {
    /// Waiting to be verified
    Pending,
    /// Consumed by a successful verification
    Verified,
    /// Past its expiry instant without being verified
    Expired,
    /// Attempt cap reached without being verified
    Exhausted,
}

/// A one-time code issued to a phone number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// Unique identifier for the verification code
    pub id: Uuid,

    /// Normalized phone number this code was sent to
    pub phone_number: String,

    /// The 6-digit verification code
    pub code: String,

    /// Number of verification attempts charged to this code
    pub attempts: i32,

    /// Attempt cap for this code
    pub max_attempts: i32,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,

    /// Set once, when the code is consumed
    pub verified_at: Option<DateTime<Utc>>,

    /// Requester address as reported by the edge proxy; stored only
    pub ip_address: Option<String>,
}

impl VerificationCode {
    /// Creates a fresh pending code
    pub fn new(
        phone_number: impl Into<String>,
        code: impl Into<String>,
        now: DateTime<Utc>,
        ttl: Duration,
        max_attempts: i32,
        ip_address: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            phone_number: phone_number.into(),
            code: code.into(),
            attempts: 0,
            max_attempts,
            created_at: now,
            expires_at: now + ttl,
            verified_at: None,
            ip_address,
        }
    }

    /// Checks if the verification code has expired at `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whether the code has already been consumed
    pub fn is_verified(&self) -> bool {
        self.verified_at.is_some()
    }

    /// Whether the attempt cap has been reached
    pub fn is_exhausted(&self) -> bool {
        self.attempts >= self.max_attempts
    }

    /// A code is usable while it is unverified, unexpired and below its attempt cap
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        !self.is_verified() && !self.is_expired(now) && !self.is_exhausted()
    }

    /// Current lifecycle state. Verification wins over the other terminal states.
    pub fn state(&self, now: DateTime<Utc>) -> CodeState {
        if self.is_verified() {
            CodeState::Verified
        } else if self.is_exhausted() {
            CodeState::Exhausted
        } else if self.is_expired(now) {
            CodeState::Expired
        } else {
            CodeState::Pending
        }
    }

    /// Gets the number of remaining verification attempts
    pub fn remaining_attempts(&self) -> i32 {
        (self.max_attempts - self.attempts).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(now: DateTime<Utc>) -> VerificationCode {
        VerificationCode::new(
            "+15551234567",
            "123456",
            now,
            Duration::minutes(DEFAULT_EXPIRATION_MINUTES),
            MAX_ATTEMPTS,
            None,
        )
    }

    #[test]
    fn test_new_code_is_pending() {
        let now = Utc::now();
        let code = pending(now);

        assert_eq!(code.attempts, 0);
        assert_eq!(code.expires_at - code.created_at, Duration::minutes(5));
        assert!(code.is_usable(now));
        assert_eq!(code.state(now), CodeState::Pending);
        assert_eq!(code.remaining_attempts(), 3);
    }

    #[test]
    fn test_code_expires_at_boundary() {
        let now = Utc::now();
        let code = pending(now);

        assert!(code.is_usable(code.expires_at - Duration::seconds(1)));
        assert!(!code.is_usable(code.expires_at));
        assert_eq!(code.state(code.expires_at), CodeState::Expired);
    }

    #[test]
    fn test_exhausted_code_is_not_usable() {
        let now = Utc::now();
        let mut code = pending(now);
        code.attempts = MAX_ATTEMPTS;

        assert!(!code.is_usable(now));
        assert_eq!(code.state(now), CodeState::Exhausted);
        assert_eq!(code.remaining_attempts(), 0);
    }

    #[test]
    fn test_verified_state_takes_precedence() {
        let now = Utc::now();
        let mut code = pending(now);
        code.verified_at = Some(now);
        code.attempts = MAX_ATTEMPTS;

        assert_eq!(code.state(now + Duration::hours(1)), CodeState::Verified);
    }
}
