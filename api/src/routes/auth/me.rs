use actix_web::{web, HttpResponse};

use sb_core::repositories::{UserRepository, VerificationCodeRepository};
use sb_core::services::{RateLimiterTrait, SmsServiceTrait};
use sb_shared::types::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::UserProfileDto;
use crate::handlers::domain_error_response;
use crate::middleware::SessionUser;

/// Handler for GET /auth/me
///
/// Returns the signed-in user's profile; 401 without a valid session cookie.
pub async fn me<U, C, S, R>(
    state: web::Data<AppState<U, C, S, R>>,
    session: SessionUser,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: VerificationCodeRepository + 'static,
    S: SmsServiceTrait + 'static,
    R: RateLimiterTrait + 'static,
{
    match state.auth_service.current_user(session.user_id).await {
        Ok(user) => HttpResponse::Ok().json(ApiResponse::success(UserProfileDto::from(user))),
        Err(error) => domain_error_response(&error, "Failed to load user"),
    }
}
