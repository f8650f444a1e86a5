//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborators the core services depend on:
//!
//! - **Database**: MySQL repositories using SQLx, plus the pool and migrations
//! - **SMS**: Twilio REST delivery and a log-only fallback

use sb_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// SMS service module - External SMS providers
pub mod sms;

pub use database::{
    DatabasePool, MySqlFavoriteTeamRepository, MySqlUserRepository, MySqlVerificationCodeRepository,
};
pub use sms::{create_sms_service, LogSmsService, SmsProvider, TwilioSmsService};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::dependency(err.to_string())
    }
}
