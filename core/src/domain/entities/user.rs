//! User entity created on first successful phone verification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account record keyed by verified phone number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,

    /// Normalized phone number; absent for accounts created through other sign-in methods
    pub phone_number: Option<String>,

    /// Whether the phone number has been verified
    pub phone_verified: bool,

    /// Whether the user finished onboarding
    pub onboarding_completed: bool,

    /// First name captured during onboarding
    pub first_name: Option<String>,

    /// Name shown in the UI
    pub display_name: Option<String>,

    /// Last successful sign-in
    pub last_sign_in: Option<DateTime<Utc>>,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create the account for a phone number that just passed verification
    pub fn new_verified(phone_number: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            phone_number: Some(phone_number.into()),
            phone_verified: true,
            onboarding_completed: false,
            first_name: None,
            display_name: None,
            last_sign_in: Some(now),
            created_at: now,
            updated_at: now,
        }
    }

    /// Record a successful verification on an existing account
    pub fn record_sign_in(&mut self, now: DateTime<Utc>) {
        self.phone_verified = true;
        self.last_sign_in = Some(now);
        self.updated_at = now;
    }

    /// Apply the onboarding form
    pub fn complete_onboarding(&mut self, first_name: impl Into<String>, now: DateTime<Utc>) {
        let first_name = first_name.into();
        self.display_name = Some(first_name.clone());
        self.first_name = Some(first_name);
        self.onboarding_completed = true;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_verified_user() {
        let now = Utc::now();
        let user = User::new_verified("+15551234567", now);

        assert_eq!(user.phone_number.as_deref(), Some("+15551234567"));
        assert!(user.phone_verified);
        assert!(!user.onboarding_completed);
        assert_eq!(user.last_sign_in, Some(now));
    }

    #[test]
    fn test_record_sign_in_updates_timestamps() {
        let created = Utc::now() - Duration::days(3);
        let mut user = User::new_verified("+15551234567", created);
        user.phone_verified = false;

        let now = Utc::now();
        user.record_sign_in(now);

        assert!(user.phone_verified);
        assert_eq!(user.last_sign_in, Some(now));
        assert_eq!(user.created_at, created);
        assert_eq!(user.updated_at, now);
    }

    #[test]
    fn test_complete_onboarding_sets_display_name() {
        let mut user = User::new_verified("+15551234567", Utc::now());
        user.complete_onboarding("Jordan", Utc::now());

        assert!(user.onboarding_completed);
        assert_eq!(user.first_name.as_deref(), Some("Jordan"));
        assert_eq!(user.display_name.as_deref(), Some("Jordan"));
    }
}
