//! Rate limiting traits and implementations for authentication service

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::errors::DomainError;
use crate::repositories::VerificationCodeRepository;

/// Outcome of a send-code rate limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allow,
    Deny { retry_after_secs: i64 },
}

/// Rate limiting service trait for code-send requests
#[async_trait]
pub trait RateLimiterTrait: Send + Sync {
    /// Decide whether a new code may be sent to the (normalized) phone number
    async fn check_send_allowed(&self, phone: &str) -> Result<RateLimitDecision, DomainError>;
}

/// Denies a send while the phone's newest stored code is younger than the cooldown.
///
/// The check reads the verification store and records nothing itself; the
/// issued code is the record. Two concurrent requests can both pass.
pub struct CooldownRateLimiter<C: VerificationCodeRepository> {
    repository: Arc<C>,
    cooldown: Duration,
}

impl<C: VerificationCodeRepository> CooldownRateLimiter<C> {
    pub fn new(repository: Arc<C>, cooldown_seconds: i64) -> Self {
        Self {
            repository,
            cooldown: Duration::seconds(cooldown_seconds),
        }
    }
}

#[async_trait]
impl<C: VerificationCodeRepository> RateLimiterTrait for CooldownRateLimiter<C> {
    async fn check_send_allowed(&self, phone: &str) -> Result<RateLimitDecision, DomainError> {
        let Some(last_sent) = self.repository.latest_created_at(phone).await? else {
            return Ok(RateLimitDecision::Allow);
        };

        let elapsed = Utc::now() - last_sent;
        if elapsed >= self.cooldown {
            return Ok(RateLimitDecision::Allow);
        }

        let remaining = self.cooldown - elapsed;
        // Round up so clients never retry a moment too early
        let retry_after_secs = (remaining.num_milliseconds() + 999) / 1000;
        Ok(RateLimitDecision::Deny {
            retry_after_secs: retry_after_secs.max(1),
        })
    }
}
