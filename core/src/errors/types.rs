//! Error types for phone sign-in, session handling, and input validation
//!
//! Display strings here are the messages returned to clients, so they are
//! kept short and free of internal detail.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Please wait before requesting another code")]
    RateLimited { retry_after_secs: i64 },

    #[error("Invalid or expired code")]
    InvalidOrExpiredCode,

    #[error("Code has already been used")]
    CodeAlreadyUsed,

    #[error("Too many attempts. Please request a new code")]
    TooManyAttempts,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("User not found")]
    UserNotFound,
}

/// Session token errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("At least one {item} must be selected")]
    EmptySelection { item: String },

    #[error("Invalid length: {field} (max: {max}, actual: {actual})")]
    InvalidLength {
        field: String,
        max: usize,
        actual: usize,
    },
}
