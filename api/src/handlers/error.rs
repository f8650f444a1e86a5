//! Domain error to HTTP response mapping.
//!
//! Every failure leaves the API as `{"success": false, "error": "..."}`.
//! Collaborator failures are logged with their detail and reported to the
//! client with a generic message chosen by the handler.

use actix_web::{
    error::{InternalError, JsonPayloadError, UrlencodedError},
    http::StatusCode,
    HttpRequest, HttpResponse,
};

use sb_core::errors::{AuthError, DomainError, TokenError};
use sb_shared::types::ApiResponse;

/// HTTP status for a domain error
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Validation { .. } | DomainError::ValidationErr(_) => StatusCode::BAD_REQUEST,
        DomainError::Auth(auth) => match auth {
            AuthError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AuthError::InvalidOrExpiredCode
            | AuthError::CodeAlreadyUsed
            | AuthError::TooManyAttempts => StatusCode::BAD_REQUEST,
            AuthError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
        },
        DomainError::Token(TokenError::TokenGenerationFailed) => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Token(_) | DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Conflict { .. } => StatusCode::CONFLICT,
        DomainError::Dependency { .. } | DomainError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Build the error response for a failed operation
///
/// # Arguments
/// * `error` - The domain error
/// * `server_error_message` - Message shown to the client for 5xx failures
pub fn domain_error_response(error: &DomainError, server_error_message: &str) -> HttpResponse {
    let status = status_for(error);

    let message = if status.is_server_error() {
        tracing::error!(event = "request_failed", error = %error, "Request failed on a dependency");
        server_error_message.to_string()
    } else {
        error.to_string()
    };

    let mut response = HttpResponse::build(status);
    if let DomainError::Auth(AuthError::RateLimited { retry_after_secs }) = error {
        response.insert_header(("Retry-After", retry_after_secs.to_string()));
    }
    response.json(ApiResponse::<()>::error(message))
}

/// Rejects malformed JSON bodies before they reach a handler
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(path = %req.path(), error = %err, "Rejected JSON payload");
    let message = match &err {
        JsonPayloadError::ContentType => "Content-Type must be application/json",
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            "Request body too large"
        }
        _ => "Invalid request body",
    };
    InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(ApiResponse::<()>::error(message)),
    )
    .into()
}

/// Rejects malformed form bodies (provider webhooks)
pub fn form_error_handler(err: UrlencodedError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(path = %req.path(), error = %err, "Rejected form payload");
    InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(ApiResponse::<()>::error("Invalid form body")),
    )
    .into()
}
