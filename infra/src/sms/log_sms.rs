//! Log-only SMS service used when no provider credentials are configured.

use async_trait::async_trait;

use sb_core::services::verification::{SmsDelivery, SmsServiceTrait};
use sb_shared::utils::phone::mask_phone_number;

/// Writes the message to the log instead of sending it
#[derive(Debug, Clone, Default)]
pub struct LogSmsService {
    /// Include the code itself in the debug line; off in production
    log_codes: bool,
}

impl LogSmsService {
    pub fn new(log_codes: bool) -> Self {
        Self { log_codes }
    }

    pub fn logs_codes(&self) -> bool {
        self.log_codes
    }
}

#[async_trait]
impl SmsServiceTrait for LogSmsService {
    async fn send_verification_code(&self, phone: &str, code: &str) -> Result<SmsDelivery, String> {
        tracing::info!(
            event = "sms_simulated",
            phone = %mask_phone_number(phone),
            "SMS provider not configured, message not sent"
        );
        if self.log_codes {
            tracing::debug!(phone = %mask_phone_number(phone), code, "Simulated verification code");
        }
        Ok(SmsDelivery::Simulated)
    }

    fn provider_name(&self) -> &'static str {
        "log"
    }

    fn is_configured(&self) -> bool {
        false
    }
}
