use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use sb_core::repositories::{UserRepository, VerificationCodeRepository};
use sb_core::services::{RateLimiterTrait, SmsServiceTrait};
use sb_shared::types::ApiResponse;
use sb_shared::utils::phone::mask_phone_number;

use crate::app::AppState;
use crate::dto::auth::{SendCodeRequest, SendCodeResponse};
use crate::dto::first_validation_message;
use crate::handlers::domain_error_response;
use crate::routes::client_ip;

/// Handler for POST /auth/phone/send-code
///
/// # Request Body
///
/// ```json
/// { "phoneNumber": "(555) 123-4567" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "success": true, "message": "Verification code sent", "code": "123456" }
/// ```
/// `code` is only present outside production.
///
/// ## Errors
/// - 400 Bad Request: phone number missing
/// - 429 Too Many Requests: a code was sent to this number in the last minute
/// - 500 Internal Server Error: datastore failure
pub async fn send_code<U, C, S, R>(
    req: HttpRequest,
    state: web::Data<AppState<U, C, S, R>>,
    request: web::Json<SendCodeRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: VerificationCodeRepository + 'static,
    S: SmsServiceTrait + 'static,
    R: RateLimiterTrait + 'static,
{
    if let Err(errors) = request.validate() {
        return HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error(first_validation_message(&errors)));
    }

    let ip = client_ip(&req);

    match state.auth_service.send_code(&request.phone_number, ip).await {
        Ok(issued) => {
            tracing::info!(
                event = "verification_code_requested",
                phone = %mask_phone_number(&issued.phone_number),
                dispatch = issued.dispatch.as_str(),
                "Verification code issued"
            );

            HttpResponse::Ok().json(SendCodeResponse {
                success: true,
                message: "Verification code sent".to_string(),
                code: issued.exposed_code,
            })
        }
        Err(error) => domain_error_response(&error, "Failed to send verification code"),
    }
}
