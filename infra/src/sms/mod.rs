//! SMS Service Module
//!
//! Implementations of the core `SmsServiceTrait`:
//!
//! - **Twilio**: production delivery over the REST API
//! - **Log**: development fallback that only writes to the log

use async_trait::async_trait;

use sb_core::services::verification::{SmsDelivery, SmsServiceTrait};
use sb_shared::config::SmsConfig;

pub mod log_sms;
pub mod twilio;

pub use log_sms::LogSmsService;
pub use twilio::TwilioSmsService;

#[cfg(test)]
mod tests;

/// Text of the verification message
pub fn verification_message(code: &str) -> String {
    format!(
        "Your verification code is: {}\n\nThis code expires in 5 minutes. Do not share this code with anyone.",
        code
    )
}

/// The SMS collaborator selected at startup
pub enum SmsProvider {
    Twilio(TwilioSmsService),
    Log(LogSmsService),
}

#[async_trait]
impl SmsServiceTrait for SmsProvider {
    async fn send_verification_code(&self, phone: &str, code: &str) -> Result<SmsDelivery, String> {
        match self {
            SmsProvider::Twilio(service) => service.send_verification_code(phone, code).await,
            SmsProvider::Log(service) => service.send_verification_code(phone, code).await,
        }
    }

    fn provider_name(&self) -> &'static str {
        match self {
            SmsProvider::Twilio(service) => service.provider_name(),
            SmsProvider::Log(service) => service.provider_name(),
        }
    }

    fn is_configured(&self) -> bool {
        match self {
            SmsProvider::Twilio(service) => service.is_configured(),
            SmsProvider::Log(service) => service.is_configured(),
        }
    }
}

/// Create an SMS service based on configuration
///
/// Uses Twilio when credentials are present. Falls back to the log-only
/// service when they are absent or the Twilio client cannot be built.
pub fn create_sms_service(config: &SmsConfig) -> SmsProvider {
    match &config.twilio {
        Some(twilio) => {
            match TwilioSmsService::new(twilio.clone(), config.status_callback_url.clone()) {
                Ok(service) => SmsProvider::Twilio(service),
                Err(e) => {
                    tracing::error!(event = "sms_provider_init_failed", error = %e, "Failed to initialize Twilio SMS service");
                    tracing::warn!("Falling back to log-only SMS service");
                    SmsProvider::Log(LogSmsService::new(config.log_codes))
                }
            }
        }
        None => {
            tracing::warn!(
                event = "sms_provider_unconfigured",
                "Twilio credentials not set, verification codes will only be logged"
            );
            SmsProvider::Log(LogSmsService::new(config.log_codes))
        }
    }
}
