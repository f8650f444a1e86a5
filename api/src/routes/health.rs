use actix_web::{web, HttpResponse};

use sb_core::repositories::{UserRepository, VerificationCodeRepository};
use sb_core::services::{RateLimiterTrait, SmsServiceTrait};

use crate::app::AppState;

/// Health check endpoint handler
///
/// 200 when the datastore answers, 503 otherwise.
pub async fn health_check<U, C, S, R>(state: web::Data<AppState<U, C, S, R>>) -> HttpResponse
where
    U: UserRepository + 'static,
    C: VerificationCodeRepository + 'static,
    S: SmsServiceTrait + 'static,
    R: RateLimiterTrait + 'static,
{
    let database = state.health.database_healthy().await;

    let body = serde_json::json!({
        "status": if database { "healthy" } else { "degraded" },
        "service": "scoreboard-api",
        "version": env!("CARGO_PKG_VERSION"),
        "database": database,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    if database {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
