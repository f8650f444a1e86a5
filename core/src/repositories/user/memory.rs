//! In-memory implementation of UserRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

use super::trait_::UserRepository;

/// User store keyed by id, enforcing unique phone numbers
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    /// Create a new, empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }

    fn not_found() -> DomainError {
        DomainError::NotFound {
            resource: "User".to_string(),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.phone_number.as_deref() == Some(phone_number))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if let Some(phone) = user.phone_number.as_deref() {
            if users
                .values()
                .any(|u| u.phone_number.as_deref() == Some(phone))
            {
                return Err(DomainError::Conflict {
                    resource: "user phone number".to_string(),
                });
            }
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn record_sign_in(&self, id: Uuid, now: DateTime<Utc>) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or_else(Self::not_found)?;
        user.record_sign_in(now);
        Ok(user.clone())
    }

    async fn complete_onboarding(
        &self,
        id: Uuid,
        first_name: &str,
        now: DateTime<Utc>,
    ) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or_else(Self::not_found)?;
        user.complete_onboarding(first_name, now);
        Ok(user.clone())
    }
}
