use actix_web::{web, HttpResponse};
use chrono::Utc;

use sb_core::repositories::{UserRepository, VerificationCodeRepository};
use sb_core::services::{RateLimiterTrait, SmsServiceTrait};
use sb_shared::types::ApiResponse;
use sb_shared::utils::phone::mask_phone_number;

use crate::app::AppState;
use crate::dto::sms::{SmsServiceStatus, SmsStatusCallback, SmsStatusReport};

/// Handler for POST /sms/status
///
/// Twilio delivery status webhook. The payload is only logged.
pub async fn status_callback(form: web::Form<SmsStatusCallback>) -> HttpResponse {
    let callback = form.into_inner();
    let phone = callback
        .to
        .as_deref()
        .map(mask_phone_number)
        .unwrap_or_default();
    let sid = callback.message_sid.as_deref().unwrap_or("unknown");
    let status = callback.message_status.as_deref().unwrap_or("unknown");

    if callback.is_delivery_failure() {
        tracing::warn!(
            event = "sms_delivery_error",
            message_sid = sid,
            status,
            phone = %phone,
            error_code = callback.error_code.as_deref().unwrap_or(""),
            error_message = callback.error_message.as_deref().unwrap_or(""),
            "SMS delivery reported an error"
        );
    } else {
        tracing::info!(
            event = "sms_status",
            message_sid = sid,
            status,
            phone = %phone,
            "SMS delivery status update"
        );
    }

    HttpResponse::Ok().json(ApiResponse::ok())
}

/// Handler for GET /sms/status-check
///
/// Reports which SMS collaborator is active and which credentials were set.
pub async fn status_check<U, C, S, R>(state: web::Data<AppState<U, C, S, R>>) -> HttpResponse
where
    U: UserRepository + 'static,
    C: VerificationCodeRepository + 'static,
    S: SmsServiceTrait + 'static,
    R: RateLimiterTrait + 'static,
{
    HttpResponse::Ok().json(ApiResponse::success(SmsStatusReport {
        service: service_status(state.get_ref()),
        environment: state.environment.to_string(),
        timestamp: Utc::now(),
    }))
}

/// Active collaborator and credential presence
pub(crate) fn service_status<U, C, S, R>(state: &AppState<U, C, S, R>) -> SmsServiceStatus
where
    U: UserRepository,
    C: VerificationCodeRepository,
    S: SmsServiceTrait,
    R: RateLimiterTrait,
{
    let sms = state.auth_service.verification_service().sms_service();
    SmsServiceStatus {
        configured: sms.is_configured(),
        provider: sms.provider_name().to_string(),
        credentials: state.sms_credentials,
    }
}
