//! Shared test harness: the real route table over in-memory stores

#![allow(dead_code)]

use actix_web::web;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use sb_api::{AppState, HealthProbe};
use sb_core::repositories::{
    InMemoryFavoriteTeamRepository, InMemoryUserRepository, InMemoryVerificationCodeRepository,
};
use sb_core::services::{
    AuthService, CooldownRateLimiter, SessionService, SmsDelivery, SmsServiceTrait,
    VerificationService, VerificationServiceConfig,
};
use sb_shared::config::{Environment, SessionConfig, TwilioCredentialFlags};

pub type Users = InMemoryUserRepository;
pub type Codes = InMemoryVerificationCodeRepository;
pub type Limiter = CooldownRateLimiter<Codes>;
pub type TestState = AppState<Users, Codes, RecordingSms, Limiter>;

pub const TEST_SECRET: &str = "integration-test-secret-with-enough-length";

/// SMS collaborator that remembers every code it was asked to send
#[derive(Default)]
pub struct RecordingSms {
    pub sent: Mutex<Vec<(String, String)>>,
}

impl RecordingSms {
    pub fn last_code_for(&self, phone: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(p, _)| p == phone)
            .map(|(_, code)| code.clone())
    }
}

#[async_trait]
impl SmsServiceTrait for RecordingSms {
    async fn send_verification_code(&self, phone: &str, code: &str) -> Result<SmsDelivery, String> {
        self.sent
            .lock()
            .unwrap()
            .push((phone.to_string(), code.to_string()));
        Ok(SmsDelivery::Simulated)
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn is_configured(&self) -> bool {
        false
    }
}

pub struct StaticHealth(pub bool);

#[async_trait]
impl HealthProbe for StaticHealth {
    async fn database_healthy(&self) -> bool {
        self.0
    }
}

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub sessions: web::Data<SessionService>,
    pub sms: Arc<RecordingSms>,
    pub users: Arc<Users>,
    pub codes: Arc<Codes>,
    pub teams: Arc<InMemoryFavoriteTeamRepository>,
}

impl TestContext {
    pub fn new(environment: Environment) -> Self {
        Self::with_health(environment, true)
    }

    pub fn with_health(environment: Environment, healthy: bool) -> Self {
        Self::build(environment, healthy, TwilioCredentialFlags::default())
    }

    pub fn with_credentials(environment: Environment, credentials: TwilioCredentialFlags) -> Self {
        Self::build(environment, true, credentials)
    }

    fn build(environment: Environment, healthy: bool, credentials: TwilioCredentialFlags) -> Self {
        let users = Arc::new(Users::new());
        let codes = Arc::new(Codes::new());
        let sms = Arc::new(RecordingSms::default());
        let teams = Arc::new(InMemoryFavoriteTeamRepository::new());

        let verification = Arc::new(VerificationService::new(
            codes.clone(),
            sms.clone(),
            VerificationServiceConfig::for_environment(environment),
        ));
        let limiter = Arc::new(Limiter::new(codes.clone(), 60));

        let state = web::Data::new(AppState {
            auth_service: Arc::new(AuthService::new(
                users.clone(),
                verification,
                limiter,
                teams.clone(),
            )),
            environment,
            sms_credentials: credentials,
            health: Arc::new(StaticHealth(healthy)),
        });

        Self {
            state,
            sessions: web::Data::new(SessionService::new(SessionConfig::new(TEST_SECRET))),
            sms,
            users,
            codes,
            teams,
        }
    }
}

/// Build the test service for a [`TestContext`]
macro_rules! init_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($ctx.state.clone())
                .app_data($ctx.sessions.clone())
                .configure(sb_api::app::configure::<
                    common::Users,
                    common::Codes,
                    common::RecordingSms,
                    common::Limiter,
                >(16 * 1024)),
        )
        .await
    };
}
