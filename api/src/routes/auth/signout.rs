use actix_web::{web, HttpResponse};

use sb_core::services::SessionService;
use sb_shared::types::ApiResponse;

use crate::middleware::clear_session_cookie;

/// Handler for POST /auth/signout
///
/// Sessions are stateless, so signing out only clears the cookie.
pub async fn signout(sessions: web::Data<SessionService>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(clear_session_cookie(sessions.config()))
        .json(ApiResponse::ok())
}
