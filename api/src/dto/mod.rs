//! Request and response bodies

pub mod auth;
pub mod onboarding;
pub mod sms;

use validator::ValidationErrors;

/// First human-readable message out of a validation failure
pub fn first_validation_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errors| errors.iter())
        .find_map(|error| error.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid request data".to_string())
}
