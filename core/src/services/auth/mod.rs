//! Authentication service module
//!
//! This module wires the phone sign-in flow together:
//! - Phone normalization at the boundary
//! - Send-code rate limiting
//! - Code issue and verification through the verification service
//! - User lookup or creation after a successful verification
//! - Onboarding updates

mod rate_limiter;
mod service;

#[cfg(test)]
mod tests;

pub use rate_limiter::{CooldownRateLimiter, RateLimitDecision, RateLimiterTrait};
pub use service::{AuthService, MAX_FIRST_NAME_LENGTH};
