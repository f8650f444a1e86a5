//! Route handlers

pub mod auth;
pub mod health;
pub mod onboarding;
pub mod sms;

use actix_web::HttpRequest;

/// Client address: first `X-Forwarded-For` entry, then `X-Real-IP`, then the peer
pub fn client_ip(req: &HttpRequest) -> Option<String> {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    if let Some(forwarded_for) = header("X-Forwarded-For") {
        if let Some(ip) = forwarded_for.split(',').map(str::trim).find(|ip| !ip.is_empty()) {
            return Some(ip.to_string());
        }
    }

    header("X-Real-IP").or_else(|| req.connection_info().peer_addr().map(str::to_string))
}
