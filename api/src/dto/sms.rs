use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use sb_core::services::SmsDelivery;
use sb_shared::config::TwilioCredentialFlags;

/// Code sent by `/sms/test` when the request does not name one
pub const DEFAULT_TEST_CODE: &str = "123456";

/// Form fields Twilio posts to the delivery status webhook
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SmsStatusCallback {
    #[serde(rename = "MessageSid")]
    pub message_sid: Option<String>,
    #[serde(rename = "MessageStatus")]
    pub message_status: Option<String>,
    #[serde(rename = "To")]
    pub to: Option<String>,
    #[serde(rename = "ErrorCode")]
    pub error_code: Option<String>,
    #[serde(rename = "ErrorMessage")]
    pub error_message: Option<String>,
}

impl SmsStatusCallback {
    /// Whether the provider gave up on the message
    pub fn is_delivery_failure(&self) -> bool {
        matches!(self.message_status.as_deref(), Some("failed") | Some("undelivered"))
            || self.error_code.is_some()
            || self.error_message.is_some()
    }
}

/// Provider selection plus which credentials were supplied
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsServiceStatus {
    pub configured: bool,
    pub provider: String,
    #[serde(flatten)]
    pub credentials: TwilioCredentialFlags,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsStatusReport {
    #[serde(flatten)]
    pub service: SmsServiceStatus,
    pub environment: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SmsTestRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 32, message = "Phone number is required"))]
    pub phone_number: String,

    #[serde(default)]
    pub test_code: Option<String>,
}

impl SmsTestRequest {
    /// The requested code, or the fixed default when absent or blank
    pub fn code(&self) -> &str {
        match self.test_code.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => code,
            _ => DEFAULT_TEST_CODE,
        }
    }
}

/// What the collaborator did with the test message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsSendResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    pub simulated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<SmsDelivery, String>> for SmsSendResult {
    fn from(result: Result<SmsDelivery, String>) -> Self {
        match result {
            Ok(SmsDelivery::Sent { message_id }) => Self {
                success: true,
                message_id: Some(message_id),
                simulated: false,
                error: None,
            },
            Ok(SmsDelivery::Simulated) => Self {
                success: true,
                message_id: None,
                simulated: true,
                error: None,
            },
            Err(error) => Self {
                success: false,
                message_id: None,
                simulated: false,
                error: Some(error),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsTestReport {
    pub phone_number: String,
    pub code: String,
    pub sms_result: SmsSendResult,
    pub service_status: SmsServiceStatus,
    pub environment: String,
    pub timestamp: DateTime<Utc>,
}
