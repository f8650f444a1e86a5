//! Shared utilities and common types for the Scoreboard server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Configuration error type
//! - Phone number normalization and masking
//! - API response envelope

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, DatabaseConfig, Environment, LogFormat, LoggingConfig, RateLimitConfig,
    ServerConfig, SessionConfig, SmsConfig, TwilioConfig, TwilioCredentialFlags,
};
pub use errors::ConfigError;
pub use types::ApiResponse;
pub use utils::phone;
