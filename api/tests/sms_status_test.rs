//! HTTP tests for the SMS webhook, status report and health check

#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use common::TestContext;
use sb_shared::config::{Environment, TwilioCredentialFlags};

#[actix_web::test]
async fn test_status_callback_accepts_twilio_form() {
    let ctx = TestContext::new(Environment::Production);
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/sms/status")
        .set_form([
            ("MessageSid", "SM0123456789"),
            ("MessageStatus", "undelivered"),
            ("To", "+15551234567"),
            ("ErrorCode", "30003"),
            ("ErrorMessage", "Unreachable destination handset"),
        ])
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], true);
}

#[actix_web::test]
async fn test_status_check_reports_provider() {
    let ctx = TestContext::new(Environment::Staging);
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/sms/status-check").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["configured"], false);
    assert_eq!(body["data"]["provider"], "mock");
    assert_eq!(body["data"]["environment"], "staging");
    assert_eq!(body["data"]["accountSid"], false);
    assert_eq!(body["data"]["authToken"], false);
    assert_eq!(body["data"]["phoneNumber"], false);
}

#[actix_web::test]
async fn test_status_check_reports_partial_credentials() {
    let ctx = TestContext::with_credentials(
        Environment::Production,
        TwilioCredentialFlags {
            account_sid: true,
            auth_token: false,
            phone_number: true,
        },
    );
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/sms/status-check").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["accountSid"], true);
    assert_eq!(body["data"]["authToken"], false);
    assert_eq!(body["data"]["phoneNumber"], true);
}

#[actix_web::test]
async fn test_sms_test_endpoint_is_development_only() {
    for environment in [Environment::Staging, Environment::Production] {
        let ctx = TestContext::new(environment);
        let app = init_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/sms/test")
            .set_json(json!({ "phoneNumber": "5551234567" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Test endpoint only available in development");
        assert!(ctx.sms.sent.lock().unwrap().is_empty());
    }
}

#[actix_web::test]
async fn test_sms_test_endpoint_sends_default_code() {
    let ctx = TestContext::new(Environment::Development);
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/sms/test")
        .set_json(json!({ "phoneNumber": "(555) 123-4567" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["phoneNumber"], "+15551234567");
    assert_eq!(body["data"]["code"], "123456");
    assert_eq!(body["data"]["smsResult"]["success"], true);
    assert_eq!(body["data"]["serviceStatus"]["provider"], "mock");
    assert_eq!(ctx.sms.last_code_for("+15551234567").as_deref(), Some("123456"));

    // No verification record is created
    assert!(ctx.codes.all().await.is_empty());
}

#[actix_web::test]
async fn test_sms_test_endpoint_requires_phone() {
    let ctx = TestContext::new(Environment::Development);
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/sms/test")
        .set_json(json!({ "testCode": "654321" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Phone number is required");
}

#[actix_web::test]
async fn test_health_reflects_database_probe() {
    let healthy = TestContext::with_health(Environment::Development, true);
    let app = init_app!(healthy);
    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");

    let degraded = TestContext::with_health(Environment::Development, false);
    let app = init_app!(degraded);
    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}
