use actix_web::{web, HttpResponse};

use sb_core::repositories::{UserRepository, VerificationCodeRepository};
use sb_core::services::{RateLimiterTrait, SmsServiceTrait};
use sb_shared::types::ApiResponse;

use crate::app::AppState;
use crate::dto::onboarding::{favorite_teams_message, FavoriteTeamsRequest, FavoriteTeamsSaved};
use crate::handlers::domain_error_response;
use crate::middleware::SessionUser;

/// Handler for POST /onboarding/teams
///
/// Replaces the signed-in user's favorite teams.
///
/// # Request Body
///
/// ```json
/// { "teamIds": [3, 17] }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: no valid session cookie
/// - 400 Bad Request: empty selection or a non-positive team id
pub async fn save_favorite_teams<U, C, S, R>(
    state: web::Data<AppState<U, C, S, R>>,
    session: Option<SessionUser>,
    request: web::Json<FavoriteTeamsRequest>,
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
        .save_favorite_teams(session.user_id, &request.team_ids)
        .await
    {
        Ok(count) => HttpResponse::Ok().json(
            ApiResponse::success(FavoriteTeamsSaved { count })
                .with_message(favorite_teams_message(count)),
        ),
        Err(error) => domain_error_response(&error, "Failed to save favorite teams"),
    }
}
