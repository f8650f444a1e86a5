use actix_web::{web, HttpResponse};

use sb_core::repositories::{UserRepository, VerificationCodeRepository};
use sb_core::services::{RateLimiterTrait, SmsServiceTrait};
use sb_shared::types::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::UserProfileDto;
use crate::dto::onboarding::CompleteOnboardingRequest;
use crate::handlers::domain_error_response;
use crate::middleware::SessionUser;

/// Handler for POST /onboarding/complete
///
/// # Request Body
///
/// ```json
/// { "firstName": "Jordan" }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: no valid session cookie
/// - 400 Bad Request: first name missing or longer than 100 characters
pub async fn complete_onboarding<U, C, S, R>(
    state: web::Data<AppState<U, C, S, R>>,
    session: Option<SessionUser>,
    request: web::Json<CompleteOnboardingRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: VerificationCodeRepository + 'static,
    S: SmsServiceTrait + 'static,
    R: RateLimiterTrait + 'static,
{
    let Some(session) = session else {
        return HttpResponse::Unauthorized().json(ApiResponse::<()>::error("Authentication required"));
    };

    match state
        .auth_service
        .complete_onboarding(session.user_id, &request.first_name)
        .await
    {
        Ok(user) => {
            tracing::info!(event = "onboarding_completed", user_id = %user.id, "Onboarding completed");
            HttpResponse::Ok().json(
                ApiResponse::success(UserProfileDto::from(user))
                    .with_message("Onboarding completed successfully"),
            )
        }
        Err(error) => domain_error_response(&error, "Failed to complete onboarding"),
    }
}
