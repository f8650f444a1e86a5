//! Unit tests for Twilio SMS service

use std::time::Duration;

use sb_core::services::verification::{SmsDelivery, SmsServiceTrait};
use sb_shared::config::TwilioConfig;

use super::FakeTwilio;
use crate::sms::twilio::backoff_delay;
use crate::sms::TwilioSmsService;
use crate::InfrastructureError;

fn config_for(base_url: &str, max_attempts: u32) -> TwilioConfig {
    let mut config = TwilioConfig::new("ACtest_account_sid", "test_auth_token", "+15550001111");
    config.api_base_url = base_url.to_string();
    config.max_attempts = max_attempts;
    config.request_timeout_secs = 5;
    config
}

fn service_for(base_url: &str, max_attempts: u32, callback: Option<&str>) -> TwilioSmsService {
    TwilioSmsService::new(config_for(base_url, max_attempts), callback.map(str::to_string))
        .unwrap()
        .with_retry_base_delay(Duration::from_millis(1))
}

#[test]
fn test_new_rejects_non_e164_sender() {
    let mut config = config_for("https://api.twilio.com", 3);
    config.from_number = "15550001111".to_string();

    let result = TwilioSmsService::new(config, None);
    assert!(matches!(result, Err(InfrastructureError::Config(msg)) if msg.contains("E.164")));
}

#[test]
fn test_messages_url() {
    let service = service_for("https://api.twilio.com/", 3, None);
    assert_eq!(
        service.messages_url(),
        "https://api.twilio.com/2010-04-01/Accounts/ACtest_account_sid/Messages.json"
    );
}

#[tokio::test]
async fn test_rejects_non_e164_recipient_without_calling_provider() {
    let fake = FakeTwilio::start("201 Created", r#"{"sid":"SM1"}"#).await;
    let service = service_for(&fake.base_url, 3, None);

    let result = service.send_verification_code("5551234567", "123456").await;

    assert!(result.is_err());
    assert_eq!(fake.hits(), 0);
}

#[tokio::test]
async fn test_successful_send_returns_message_sid() {
    let fake = FakeTwilio::start("201 Created", r#"{"sid":"SM0123456789"}"#).await;
    let service = service_for(&fake.base_url, 3, Some("https://scores.example.com/sms/status"));

    let delivery = service
        .send_verification_code("+15551234567", "654321")
        .await
        .unwrap();

    assert_eq!(
        delivery,
        SmsDelivery::Sent {
            message_id: "SM0123456789".to_string()
        }
    );
    assert_eq!(fake.hits(), 1);

    let body = fake.last_body.lock().unwrap().clone();
    assert!(body.contains("To=%2B15551234567"));
    assert!(body.contains("From=%2B15550001111"));
    assert!(body.contains("654321"));
    assert!(body.contains("StatusCallback="));
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let fake = FakeTwilio::start(
        "400 Bad Request",
        r#"{"code":21211,"message":"The 'To' number is not a valid phone number.","status":400}"#,
    )
    .await;
    let service = service_for(&fake.base_url, 3, None);

    let err = service
        .send_verification_code("+15551234567", "123456")
        .await
        .unwrap_err();

    assert!(err.contains("21211"), "got {}", err);
    assert_eq!(fake.hits(), 1);
}

#[tokio::test]
async fn test_server_error_is_retried_up_to_max_attempts() {
    let fake = FakeTwilio::start("503 Service Unavailable", r#"{"message":"down"}"#).await;
    let service = service_for(&fake.base_url, 3, None);

    let err = service
        .send_verification_code("+15551234567", "123456")
        .await
        .unwrap_err();

    assert!(err.contains("after 3 attempts"), "got {}", err);
    assert_eq!(fake.hits(), 3);
}

#[test]
fn test_backoff_doubles_and_saturates() {
    let base = Duration::from_millis(100);
    assert_eq!(backoff_delay(base, 1), Duration::from_millis(200));
    assert_eq!(backoff_delay(base, 3), Duration::from_millis(800));
    assert_eq!(backoff_delay(base, 64), base * u32::MAX);
    assert_eq!(backoff_delay(Duration::MAX, 2), Duration::MAX);
}
