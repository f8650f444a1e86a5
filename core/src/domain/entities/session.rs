//! Session entities handed from phone verification to the session issuer.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::User;

/// Identity produced by a successful verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedUser {
    pub id: Uuid,
    pub phone_number: String,
    pub onboarding_completed: bool,
}

impl VerifiedUser {
    /// Project a stored user, using the phone number that was just verified
    pub fn from_user(user: &User, phone_number: &str) -> Self {
        Self {
            id: user.id,
            phone_number: phone_number.to_string(),
            onboarding_completed: user.onboarding_completed,
        }
    }
}

/// Claims structure for the session JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: String,

    /// Verified phone number
    pub phone_number: String,

    /// Whether onboarding was completed when the session was issued
    pub onboarding_completed: bool,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID
    pub jti: String,
}

impl SessionClaims {
    /// Build claims for a freshly verified user
    pub fn new(
        user: &VerifiedUser,
        now: DateTime<Utc>,
        ttl: Duration,
        issuer: &str,
        audience: &str,
    ) -> Self {
        Self {
            sub: user.id.to_string(),
            phone_number: user.phone_number.clone(),
            onboarding_completed: user.onboarding_completed,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            nbf: now.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Parse the subject back into a user id
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}

/// Signed session token plus its expiry, ready to be written into a cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub max_age_seconds: i64,
}
