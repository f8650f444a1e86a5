//! Verification service module for SMS-based authentication
//!
//! This module provides the one-time code workflow:
//! - Code generation
//! - Code persistence and SMS dispatch
//! - Code verification with attempt tracking and single use

mod config;
mod generator;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationServiceConfig;
pub use generator::{generate_code, CodeGenerator, RandomCodeGenerator, CODE_MAX, CODE_MIN};
pub use service::VerificationService;
pub use traits::{SmsDelivery, SmsServiceTrait};
pub use types::{DispatchOutcome, IssuedCode};
