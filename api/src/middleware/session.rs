//! Session cookie handling.
//!
//! The session token issued after phone verification travels in an
//! `HttpOnly` cookie. [`SessionUser`] is the extractor protected handlers
//! take; it validates the cookie with the [`SessionService`] registered as
//! app data.

use actix_web::{
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    dev::Payload,
    http::StatusCode,
    web, FromRequest, HttpRequest, HttpResponse, ResponseError,
};
use std::future::{ready, Ready};
use uuid::Uuid;

use sb_core::domain::entities::{SessionClaims, SessionToken};
use sb_core::services::SessionService;
use sb_shared::config::SessionConfig;
use sb_shared::types::ApiResponse;

/// Authenticated caller extracted from the session cookie
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user_id: Uuid,
    pub claims: SessionClaims,
}

/// Why a request carries no usable session
#[derive(Debug, thiserror::Error)]
pub enum SessionRejected {
    #[error("Not authenticated")]
    Missing,
    #[error("Not authenticated")]
    Invalid,
    #[error("Session validation not configured")]
    NotConfigured,
}

impl ResponseError for SessionRejected {
    fn status_code(&self) -> StatusCode {
        match self {
            SessionRejected::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiResponse::<()>::error(self.to_string()))
    }
}

impl FromRequest for SessionUser {
    type Error = SessionRejected;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_session(req))
    }
}

fn extract_session(req: &HttpRequest) -> Result<SessionUser, SessionRejected> {
    let sessions = req
        .app_data::<web::Data<SessionService>>()
        .ok_or(SessionRejected::NotConfigured)?;

    let cookie = req
        .cookie(&sessions.config().cookie_name)
        .ok_or(SessionRejected::Missing)?;

    let claims = sessions.validate(cookie.value()).map_err(|e| {
        tracing::debug!(error = %e, "Rejected session cookie");
        SessionRejected::Invalid
    })?;
    let user_id = claims.user_id().ok_or(SessionRejected::Invalid)?;

    Ok(SessionUser { user_id, claims })
}

/// Cookie carrying a freshly issued session
pub fn session_cookie(config: &SessionConfig, session: &SessionToken) -> Cookie<'static> {
    Cookie::build(config.cookie_name.clone(), session.token.clone())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookie)
        .max_age(CookieDuration::seconds(session.max_age_seconds))
        .finish()
}

/// Cookie that removes the session on the client
pub fn clear_session_cookie(config: &SessionConfig) -> Cookie<'static> {
    let mut cookie = Cookie::build(config.cookie_name.clone(), "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookie)
        .finish();
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_session_cookie_attributes() {
        let config = SessionConfig::new("test-secret-key-that-is-long-enough");
        let session = SessionToken {
            token: "abc.def.ghi".to_string(),
            expires_at: Utc::now(),
            max_age_seconds: 604800,
        };

        let cookie = session_cookie(&config, &session);
        assert_eq!(cookie.name(), "sports-auth-token");
        assert_eq!(cookie.value(), "abc.def.ghi");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(CookieDuration::seconds(604800)));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let config = SessionConfig::new("test-secret-key-that-is-long-enough");
        let cookie = clear_session_cookie(&config);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(CookieDuration::ZERO));
    }
}
