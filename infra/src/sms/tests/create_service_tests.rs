//! Unit tests for SMS service creation

use sb_core::services::verification::SmsServiceTrait;
use sb_shared::config::{SmsConfig, TwilioConfig};

use crate::sms::{create_sms_service, verification_message, SmsProvider};

#[test]
fn test_unconfigured_falls_back_to_log_service() {
    let service = create_sms_service(&SmsConfig::default());

    assert!(matches!(service, SmsProvider::Log(ref log) if !log.logs_codes()));
    assert_eq!(service.provider_name(), "log");
    assert!(!service.is_configured());
}

#[test]
fn test_twilio_selected_when_credentials_present() {
    let config = SmsConfig {
        twilio: Some(TwilioConfig::new("ACtest_account_sid", "test_auth_token", "+15550001111")),
        status_callback_url: None,
        ..Default::default()
    };

    let service = create_sms_service(&config);
    assert!(matches!(service, SmsProvider::Twilio(_)));
    assert!(service.is_configured());
}

#[test]
fn test_invalid_sender_number_falls_back_to_log_service() {
    let config = SmsConfig {
        twilio: Some(TwilioConfig::new("ACtest_account_sid", "test_auth_token", "5550001111")),
        status_callback_url: None,
        ..Default::default()
    };

    assert!(matches!(create_sms_service(&config), SmsProvider::Log(_)));
}

#[test]
fn test_verification_message_text() {
    let message = verification_message("482913");
    assert!(message.starts_with("Your verification code is: 482913"));
    assert!(message.contains("expires in 5 minutes"));
}

#[test]
fn test_log_service_writes_codes_only_when_allowed() {
    let config = SmsConfig {
        log_codes: true,
        ..Default::default()
    };
    assert!(matches!(create_sms_service(&config), SmsProvider::Log(ref log) if log.logs_codes()));
}
