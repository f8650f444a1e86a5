//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sb_core::domain::entities::user::User;
use sb_core::errors::DomainError;
use sb_core::repositories::UserRepository;

use super::{column_error, map_read_error, map_write_error};

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| column_error("id", e))?,
            phone_number: row
                .try_get("phone_number")
                .map_err(|e| column_error("phone_number", e))?,
            phone_verified: row
                .try_get("phone_verified")
                .map_err(|e| column_error("phone_verified", e))?,
            onboarding_completed: row
                .try_get("onboarding_completed")
                .map_err(|e| column_error("onboarding_completed", e))?,
            first_name: row
                .try_get("first_name")
                .map_err(|e| column_error("first_name", e))?,
            display_name: row
                .try_get("display_name")
                .map_err(|e| column_error("display_name", e))?,
            last_sign_in: row
                .try_get::<Option<DateTime<Utc>>, _>("last_sign_in")
                .map_err(|e| column_error("last_sign_in", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| column_error("updated_at", e))?,
        })
    }

    /// Re-read a user after an update, failing with `NotFound` if it vanished
    async fn reload(&self, id: Uuid) -> Result<User, DomainError> {
        self.find_by_id(id).await?.ok_or_else(|| DomainError::NotFound {
            resource: format!("user {}", id),
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, phone_number, phone_verified, onboarding_completed,
                   first_name, display_name, last_sign_in, created_at, updated_at
            FROM users
            WHERE phone_number = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(phone_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_read_error("Failed to find user by phone", e))?;

        result.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, phone_number, phone_verified, onboarding_completed,
                   first_name, display_name, last_sign_in, created_at, updated_at
            FROM users
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_read_error("Failed to find user by id", e))?;

        result.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, phone_number, phone_verified, onboarding_completed,
                first_name, display_name, last_sign_in, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.phone_number)
            .bind(user.phone_verified)
            .bind(user.onboarding_completed)
            .bind(&user.first_name)
            .bind(&user.display_name)
            .bind(user.last_sign_in)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error("user", e))?;

        Ok(user)
    }

    async fn record_sign_in(&self, id: Uuid, now: DateTime<Utc>) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users
            SET phone_verified = TRUE, last_sign_in = ?, updated_at = ?
            WHERE id = ?
        "#;

        sqlx::query(query)
            .bind(now)
            .bind(now)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error("user", e))?;

        self.reload(id).await
    }

    async fn complete_onboarding(
        &self,
        id: Uuid,
        first_name: &str,
        now: DateTime<Utc>,
    ) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users
            SET first_name = ?, display_name = ?, onboarding_completed = TRUE, updated_at = ?
            WHERE id = ?
        "#;

        sqlx::query(query)
            .bind(first_name)
            .bind(first_name)
            .bind(now)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error("user", e))?;

        self.reload(id).await
    }
}
