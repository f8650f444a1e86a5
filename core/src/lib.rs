//! # Scoreboard Core
//!
//! Core business logic and domain layer for the Scoreboard backend.
//! This crate contains domain entities, the phone sign-in services,
//! repository interfaces, and error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    CodeState, FavoriteTeam, SessionClaims, SessionToken, User, VerificationCode, VerifiedUser,
};
pub use errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
pub use repositories::{
    FavoriteTeamRepository, InMemoryFavoriteTeamRepository, InMemoryUserRepository,
    InMemoryVerificationCodeRepository, UserRepository, VerificationCodeRepository,
};
pub use services::{
    AuthService, CooldownRateLimiter, DispatchOutcome, IssuedCode, RateLimitDecision,
    RateLimiterTrait, SessionService, SmsDelivery, SmsServiceTrait, VerificationService,
    VerificationServiceConfig,
};
