//! Twilio SMS Service Implementation
//!
//! Sends messages through the Twilio REST API
//! (`POST /2010-04-01/Accounts/{sid}/Messages.json`, form-encoded, basic auth).
//!
//! Transport errors, 429 and 5xx responses are retried with exponential
//! backoff (`base * 2^attempt`). Other 4xx responses are final.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use sb_core::services::verification::{SmsDelivery, SmsServiceTrait};
use sb_shared::config::TwilioConfig;
use sb_shared::utils::phone::{is_e164, mask_phone_number};

use super::verification_message;
use crate::InfrastructureError;

/// Successful message creation response
#[derive(Debug, Deserialize)]
struct TwilioMessageResponse {
    sid: String,
}

/// Error body returned by the REST API
#[derive(Debug, Deserialize)]
struct TwilioErrorResponse {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

/// Why a single send attempt failed
#[derive(Debug)]
enum SendFailure {
    /// The request itself was refused; retrying cannot help
    Rejected(String),
    /// Network trouble, throttling or a provider outage
    Transient(String),
}

/// Delay before retry number `attempt`, doubling each time and saturating
pub(crate) fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempt))
}

/// Twilio SMS service implementation
pub struct TwilioSmsService {
    client: reqwest::Client,
    config: TwilioConfig,
    status_callback_url: Option<String>,
    retry_base_delay: Duration,
}

impl TwilioSmsService {
    /// Create a new Twilio SMS service
    ///
    /// # Arguments
    /// * `config` - Credentials and request settings
    /// * `status_callback_url` - Delivery webhook attached to every message, if any
    pub fn new(
        config: TwilioConfig,
        status_callback_url: Option<String>,
    ) -> Result<Self, InfrastructureError> {
        if !is_e164(&config.from_number) {
            return Err(InfrastructureError::Config(
                "TWILIO_PHONE_NUMBER must be in E.164 format (e.g. +15551234567)".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            event = "sms_provider_init",
            provider = "twilio",
            account = %config.masked_account_sid(),
            from = %mask_phone_number(&config.from_number),
            "Twilio SMS service initialized"
        );

        Ok(Self {
            client,
            config,
            status_callback_url,
            retry_base_delay: Duration::from_secs(1),
        })
    }

    /// Override the backoff unit (one second by default)
    pub fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    /// Messages resource for the configured account
    pub fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.account_sid
        )
    }

    /// Form fields for one message
    fn form_params<'a>(&'a self, to: &'a str, body: &'a str) -> Vec<(&'static str, &'a str)> {
        let mut params = vec![("To", to), ("From", self.config.from_number.as_str()), ("Body", body)];
        if let Some(callback) = &self.status_callback_url {
            params.push(("StatusCallback", callback.as_str()));
        }
        params
    }

    async fn send_once(&self, to: &str, body: &str) -> Result<String, SendFailure> {
        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&self.form_params(to, body))
            .send()
            .await
            .map_err(|e| SendFailure::Transient(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let created: TwilioMessageResponse = response
                .json()
                .await
                .map_err(|e| SendFailure::Transient(format!("unreadable response: {}", e)))?;
            return Ok(created.sid);
        }

        let detail = match response.json::<TwilioErrorResponse>().await {
            Ok(TwilioErrorResponse {
                code: Some(code),
                message: Some(message),
            }) => format!("{} (code {}): {}", status, code, message),
            Ok(TwilioErrorResponse {
                message: Some(message),
                ..
            }) => format!("{}: {}", status, message),
            _ => status.to_string(),
        };

        if status.is_client_error() && status != StatusCode::TOO_MANY_REQUESTS {
            Err(SendFailure::Rejected(detail))
        } else {
            Err(SendFailure::Transient(detail))
        }
    }

    /// Send SMS with retry logic
    async fn send_with_retry(&self, to: &str, body: &str) -> Result<String, InfrastructureError> {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            debug!(
                attempt,
                max_attempts,
                phone = %mask_phone_number(to),
                "Sending SMS via Twilio"
            );

            match self.send_once(to, body).await {
                Ok(sid) => {
                    info!(
                        event = "sms_sent",
                        provider = "twilio",
                        phone = %mask_phone_number(to),
                        message_sid = %sid,
                        attempt,
                        "SMS sent"
                    );
                    return Ok(sid);
                }
                Err(SendFailure::Rejected(detail)) => {
                    error!(
                        event = "sms_rejected",
                        phone = %mask_phone_number(to),
                        detail = %detail,
                        "Twilio rejected the message"
                    );
                    return Err(InfrastructureError::Sms(format!("Invalid request: {}", detail)));
                }
                Err(SendFailure::Transient(detail)) if attempt >= max_attempts => {
                    error!(
                        event = "sms_retries_exhausted",
                        phone = %mask_phone_number(to),
                        attempts = attempt,
                        detail = %detail,
                        "Giving up on SMS delivery"
                    );
                    return Err(InfrastructureError::Sms(format!(
                        "Failed to send SMS after {} attempts: {}",
                        attempt, detail
                    )));
                }
                Err(SendFailure::Transient(detail)) => {
                    let delay = backoff_delay(self.retry_base_delay, attempt);
                    warn!(
                        event = "sms_retry",
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        detail = %detail,
                        "SMS attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

#[async_trait]
impl SmsServiceTrait for TwilioSmsService {
    async fn send_verification_code(&self, phone: &str, code: &str) -> Result<SmsDelivery, String> {
        if !is_e164(phone) {
            return Err(format!(
                "Recipient {} is not in E.164 format",
                mask_phone_number(phone)
            ));
        }

        let body = verification_message(code);
        self.send_with_retry(phone, &body)
            .await
            .map(|message_id| SmsDelivery::Sent { message_id })
            .map_err(|e| e.to_string())
    }

    fn provider_name(&self) -> &'static str {
        "twilio"
    }

    fn is_configured(&self) -> bool {
        true
    }
}
