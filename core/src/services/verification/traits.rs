//! Traits for SMS service integration

use async_trait::async_trait;

/// What the SMS collaborator did with a message it accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmsDelivery {
    /// Handed to the provider, which returned a message id
    Sent { message_id: String },
    /// No provider configured; the message was only logged
    Simulated,
}

/// Trait for SMS service integration
#[async_trait]
pub trait SmsServiceTrait: Send + Sync {
    /// Send a verification code via SMS
    async fn send_verification_code(&self, phone: &str, code: &str) -> Result<SmsDelivery, String>;

    /// Short provider name for status reporting
    fn provider_name(&self) -> &'static str;

    /// Whether real delivery is configured
    fn is_configured(&self) -> bool;
}
