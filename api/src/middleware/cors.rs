//! CORS middleware configuration for the web client.
//!
//! The session lives in a cookie, so credentials are always allowed. Outside
//! production any origin is accepted; in production only `ALLOWED_ORIGINS`.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use sb_shared::config::{Environment, ServerConfig};

const MAX_AGE_SECONDS: usize = 3600;

/// Creates a CORS middleware instance configured for the deployment mode
pub fn create_cors(server: &ServerConfig, environment: Environment) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![header::RETRY_AFTER])
        .max_age(MAX_AGE_SECONDS)
        .supports_credentials();

    if !environment.is_production() {
        tracing::info!(environment = %environment, "Configuring permissive CORS");
        return cors.allow_any_origin();
    }

    server
        .allowed_origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .fold(cors, |cors, origin| {
            tracing::info!(origin, "Adding allowed origin");
            cors.allowed_origin(origin)
        })
}
