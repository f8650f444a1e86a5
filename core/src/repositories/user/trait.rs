//! User repository trait defining the interface for user data persistence.
//!
//! The trait is async-first and keeps the domain layer independent of the
//! storage engine. Phone numbers are always passed in normalized form.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by normalized phone number
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user registered with that phone
    /// * `Err(DomainError)` - Datastore failure
    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Insert a new user
    ///
    /// # Returns
    /// * `Err(DomainError::Conflict)` - The phone number is already registered
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Set `phone_verified` and `last_sign_in` on an existing user
    async fn record_sign_in(&self, id: Uuid, now: DateTime<Utc>) -> Result<User, DomainError>;

    /// Store the onboarding form and flag onboarding as completed
    async fn complete_onboarding(
        &self,
        id: Uuid,
        first_name: &str,
        now: DateTime<Utc>,
    ) -> Result<User, DomainError>;
}
