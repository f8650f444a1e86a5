use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use sb_core::domain::entities::{User, VerifiedUser};

/// Longest raw phone input accepted; normalized forms stay within the stored column
pub const MAX_PHONE_INPUT_LENGTH: usize = 32;

fn validate_phone_length(phone: &str) -> Result<(), ValidationError> {
    if phone.chars().count() > MAX_PHONE_INPUT_LENGTH {
        let mut error = ValidationError::new("phone_too_long");
        error.message = Some(Cow::Borrowed("Phone number is too long"));
        return Err(error);
    }
    Ok(())
}

/// Missing fields deserialize as empty strings so validation can word the error
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendCodeRequest {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Phone number is required"),
        custom(function = "validate_phone_length")
    )]
    pub phone_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCodeRequest {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Phone number and code are required"),
        custom(function = "validate_phone_length")
    )]
    pub phone_number: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Phone number and code are required"))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeResponse {
    pub success: bool,
    pub message: String,
    /// Echo of the code outside production
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedUserDto {
    pub id: Uuid,
    pub phone_number: String,
    pub onboarding_completed: bool,
}

impl From<VerifiedUser> for VerifiedUserDto {
    fn from(user: VerifiedUser) -> Self {
        Self {
            id: user.id,
            phone_number: user.phone_number,
            onboarding_completed: user.onboarding_completed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCodeResponse {
    pub success: bool,
    pub message: String,
    pub user: VerifiedUserDto,
}

/// Profile returned by `/auth/me` and onboarding
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileDto {
    pub id: Uuid,
    pub phone_number: Option<String>,
    pub first_name: Option<String>,
    pub display_name: Option<String>,
    pub onboarding_completed: bool,
}

impl From<User> for UserProfileDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            phone_number: user.phone_number,
            first_name: user.first_name,
            display_name: user.display_name,
            onboarding_completed: user.onboarding_completed,
        }
    }
}
