//! SMS delivery configuration

use serde::{Deserialize, Serialize};

use super::{non_empty, parse_or, Environment};
use crate::errors::ConfigError;

/// Upper bound on `TWILIO_MAX_ATTEMPTS`
pub const MAX_TWILIO_ATTEMPTS: u32 = 5;

/// Twilio credentials and request settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TwilioConfig {
    /// Account SID
    pub account_sid: String,

    /// Auth token
    #[serde(skip_serializing)]
    pub auth_token: String,

    /// Sender phone number in E.164 format
    pub from_number: String,

    /// REST API base URL
    pub api_base_url: String,

    /// Total send attempts before giving up
    pub max_attempts: u32,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl TwilioConfig {
    /// Build a config with default request settings
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        from_number: impl Into<String>,
    ) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            from_number: from_number.into(),
            api_base_url: String::from("https://api.twilio.com"),
            max_attempts: 3,
            request_timeout_secs: 10,
        }
    }

    /// Account SID with everything but the prefix hidden, for status output
    pub fn masked_account_sid(&self) -> String {
        let prefix: String = self.account_sid.chars().take(6).collect();
        format!("{}...", prefix)
    }
}

/// Which Twilio variables were present, reported by the status endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TwilioCredentialFlags {
    pub account_sid: bool,
    pub auth_token: bool,
    pub phone_number: bool,
}

/// SMS delivery configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SmsConfig {
    /// Twilio credentials; `None` means messages are only logged
    pub twilio: Option<TwilioConfig>,

    /// Delivery status webhook handed to the provider
    pub status_callback_url: Option<String>,

    /// Presence of each Twilio variable, including partial setups
    #[serde(default)]
    pub credentials: TwilioCredentialFlags,

    /// Whether the log-only service may write codes to the log
    #[serde(default)]
    pub log_codes: bool,
}

impl SmsConfig {
    /// Read `TWILIO_ACCOUNT_SID`, `TWILIO_AUTH_TOKEN`, `TWILIO_PHONE_NUMBER`
    /// and `PUBLIC_BASE_URL`.
    ///
    /// Twilio is enabled only when all three credentials are present. The
    /// status callback is registered only in production. `TWILIO_MAX_ATTEMPTS`
    /// is clamped to `1..=MAX_TWILIO_ATTEMPTS`.
    pub fn from_vars<F>(get: &F, env: Environment) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let sid = non_empty(get, "TWILIO_ACCOUNT_SID");
        let token = non_empty(get, "TWILIO_AUTH_TOKEN");
        let from = non_empty(get, "TWILIO_PHONE_NUMBER");
        let credentials = TwilioCredentialFlags {
            account_sid: sid.is_some(),
            auth_token: token.is_some(),
            phone_number: from.is_some(),
        };

        let twilio = match (sid, token, from) {
            (Some(sid), Some(token), Some(from)) => {
                let mut config = TwilioConfig::new(sid, token, from);
                config.max_attempts = parse_or(get, "TWILIO_MAX_ATTEMPTS", config.max_attempts)?
                    .clamp(1, MAX_TWILIO_ATTEMPTS);
                if let Some(base) = non_empty(get, "TWILIO_API_BASE_URL") {
                    config.api_base_url = base;
                }
                Some(config)
            }
            _ => None,
        };

        let status_callback_url = if env.is_production() {
            non_empty(get, "PUBLIC_BASE_URL")
                .map(|base| format!("{}/sms/status", base.trim_end_matches('/')))
        } else {
            None
        };

        Ok(Self {
            twilio,
            status_callback_url,
            credentials,
            log_codes: !env.is_production(),
        })
    }

    /// Whether a real provider is configured
    pub fn is_configured(&self) -> bool {
        self.twilio.is_some()
    }
}
