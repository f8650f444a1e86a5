//! Application state and route table
//!
//! Services are constructed once in `main` and shared across workers through
//! `web::Data`. The route table is generic over the repositories and
//! collaborators so tests can mount it over in-memory stores.

use actix_web::web;
use async_trait::async_trait;
use std::sync::Arc;

use sb_core::repositories::{UserRepository, VerificationCodeRepository};
use sb_core::services::{AuthService, RateLimiterTrait, SmsServiceTrait};
use sb_infra::DatabasePool;
use sb_shared::config::{Environment, TwilioCredentialFlags};

use crate::handlers::{form_error_handler, json_error_handler};
use crate::routes::{auth, health, onboarding, sms};

/// Liveness probe for the datastore
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn database_healthy(&self) -> bool;
}

#[async_trait]
impl HealthProbe for DatabasePool {
    async fn database_healthy(&self) -> bool {
        self.health_check().await.unwrap_or(false)
    }
}

/// Application state that holds shared services
pub struct AppState<U, C, S, R>
where
    U: UserRepository,
    C: VerificationCodeRepository,
    S: SmsServiceTrait,
    R: RateLimiterTrait,
{
    pub auth_service: Arc<AuthService<U, C, S, R>>,
    pub environment: Environment,
    /// Which SMS provider variables were set, for the status report
    pub sms_credentials: TwilioCredentialFlags,
    pub health: Arc<dyn HealthProbe>,
}

/// Route table and body extractor configuration
///
/// Expects `web::Data<AppState<U, C, S, R>>` and `web::Data<SessionService>`
/// to be registered on the `App`.
pub fn configure<U, C, S, R>(max_payload_size: usize) -> impl FnOnce(&mut web::ServiceConfig)
where
    U: UserRepository + 'static,
    C: VerificationCodeRepository + 'static,
    S: SmsServiceTrait + 'static,
    R: RateLimiterTrait + 'static,
{
    move |cfg| register_routes::<U, C, S, R>(cfg, max_payload_size)
}

fn register_routes<U, C, S, R>(cfg: &mut web::ServiceConfig, max_payload_size: usize)
where
    U: UserRepository + 'static,
    C: VerificationCodeRepository + 'static,
    S: SmsServiceTrait + 'static,
    R: RateLimiterTrait + 'static,
{
    cfg.app_data(
        web::JsonConfig::default()
            .limit(max_payload_size)
            .error_handler(json_error_handler),
    )
    .app_data(
        web::FormConfig::default()
            .limit(max_payload_size)
            .error_handler(form_error_handler),
    )
    .route("/health", web::get().to(health::health_check::<U, C, S, R>))
    .service(
        web::scope("/auth")
            .route(
                "/phone/send-code",
                web::post().to(auth::send_code::send_code::<U, C, S, R>),
            )
            .route(
                "/phone/verify-code",
                web::post().to(auth::verify_code::verify_code::<U, C, S, R>),
            )
            .route("/me", web::get().to(auth::me::me::<U, C, S, R>))
            .route("/signout", web::post().to(auth::signout::signout)),
    )
    .service(
        web::scope("/onboarding")
            .route(
                "/complete",
                web::post().to(onboarding::complete::complete_onboarding::<U, C, S, R>),
            )
            .route(
                "/teams",
                web::post().to(onboarding::teams::save_favorite_teams::<U, C, S, R>),
            ),
    )
    .service(
        web::scope("/sms")
            .route("/status", web::post().to(sms::status::status_callback))
            .route("/test", web::post().to(sms::test::send_test_message::<U, C, S, R>))
            .route(
                "/status-check",
                web::get().to(sms::status::status_check::<U, C, S, R>),
            ),
    );
}
