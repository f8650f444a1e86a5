use actix_web::{web, HttpResponse};
use validator::Validate;

use sb_core::repositories::{UserRepository, VerificationCodeRepository};
use sb_core::services::{RateLimiterTrait, SessionService, SmsServiceTrait};
use sb_shared::types::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::{VerifyCodeRequest, VerifyCodeResponse};
use crate::dto::first_validation_message;
use crate::handlers::domain_error_response;
use crate::middleware::session_cookie;

/// Handler for POST /auth/phone/verify-code
///
/// Consumes the code, signs the user in (creating the account on first
/// verification) and hands the session over in the `sports-auth-token` cookie.
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "message": "Phone number verified successfully",
///     "user": { "id": "...", "phoneNumber": "+15551234567", "onboardingCompleted": false }
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: missing fields, invalid/expired/used code, too many attempts
/// - 500 Internal Server Error: datastore failure
pub async fn verify_code<U, C, S, R>(
    state: web::Data<AppState<U, C, S, R>>,
    sessions: web::Data<SessionService>,
    request: web::Json<VerifyCodeRequest>,
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

    let user = match state
        .auth_service
        .verify_code(&request.phone_number, &request.code)
        .await
    {
        Ok(user) => user,
        Err(error) => return domain_error_response(&error, "Failed to verify code"),
    };

    let session = match sessions.issue(&user) {
        Ok(session) => session,
        Err(error) => return domain_error_response(&error, "Failed to verify code"),
    };

    HttpResponse::Ok()
        .cookie(session_cookie(sessions.config(), &session))
        .json(VerifyCodeResponse {
            success: true,
            message: "Phone number verified successfully".to_string(),
            user: user.into(),
        })
}
