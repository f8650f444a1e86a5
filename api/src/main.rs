use actix_web::{web, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use sb_api::{app, middleware::create_cors, telemetry, AppState};
use sb_core::services::{
    AuthService, CooldownRateLimiter, SessionService, VerificationService,
    VerificationServiceConfig,
};
use sb_infra::{
    create_sms_service, DatabasePool, MySqlFavoriteTeamRepository, MySqlUserRepository,
    MySqlVerificationCodeRepository, SmsProvider,
};
use sb_shared::config::AppConfig;

type Users = MySqlUserRepository;
type Codes = MySqlVerificationCodeRepository;
type Limiter = CooldownRateLimiter<Codes>;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    telemetry::init_tracing(&config.logging);

    tracing::info!(
        event = "startup",
        environment = %config.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Starting Scoreboard API server"
    );
    if config.session.is_using_default_secret() {
        tracing::warn!("JWT_SECRET not set, using the development secret");
    }

    let pool = DatabasePool::new(&config.database)
        .await
        .context("Failed to connect to the database")?;
    if config.database.run_migrations {
        pool.run_migrations()
            .await
            .context("Failed to run database migrations")?;
    }

    let users = Arc::new(Users::new(pool.get_pool().clone()));
    let codes = Arc::new(Codes::new(pool.get_pool().clone()));
    let favorite_teams = Arc::new(MySqlFavoriteTeamRepository::new(pool.get_pool().clone()));
    let sms = Arc::new(create_sms_service(&config.sms));

    let verification_service = Arc::new(VerificationService::new(
        codes.clone(),
        sms,
        VerificationServiceConfig::for_environment(config.environment),
    ));
    let rate_limiter = Arc::new(Limiter::new(
        codes,
        config.rate_limit.send_code_cooldown_seconds,
    ));
    let auth_service = Arc::new(AuthService::new(
        users,
        verification_service,
        rate_limiter,
        favorite_teams,
    ));

    let state = web::Data::new(AppState {
        auth_service,
        environment: config.environment,
        sms_credentials: config.sms.credentials,
        health: Arc::new(pool.clone()),
    });
    let sessions = web::Data::new(SessionService::new(config.session.clone()));

    let server_config = config.server.clone();
    let environment = config.environment;
    let bind_address = server_config.bind_address();
    tracing::info!(address = %bind_address, "Binding HTTP server");

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(sessions.clone())
            .wrap(create_cors(&server_config, environment))
            .wrap(TracingLogger::default())
            .configure(app::configure::<Users, Codes, SmsProvider, Limiter>(
                server_config.max_payload_size,
            ))
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("HTTP server terminated with an error")?;

    pool.close().await;
    tracing::info!(event = "shutdown", "Server stopped");
    Ok(())
}
