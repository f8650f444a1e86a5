//! Business services containing domain logic and use cases.

pub mod auth;
pub mod session;
pub mod verification;

// Re-export commonly used types
pub use auth::{AuthService, CooldownRateLimiter, RateLimitDecision, RateLimiterTrait};
pub use session::SessionService;
pub use verification::{
    DispatchOutcome, IssuedCode, SmsDelivery, SmsServiceTrait, VerificationService,
    VerificationServiceConfig,
};
