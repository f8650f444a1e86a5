//! MySQL implementation of the VerificationCodeRepository trait.
//!
//! Consumption and failed-attempt accounting are single conditional `UPDATE`
//! statements; the affected-row count tells the caller whether it won.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sb_core::domain::entities::verification_code::VerificationCode;
use sb_core::errors::DomainError;
use sb_core::repositories::VerificationCodeRepository;

use super::{column_error, map_read_error, map_write_error};

const SELECT_COLUMNS: &str = r#"
    SELECT id, phone_number, code, attempts, max_attempts,
           created_at, expires_at, verified_at, ip_address
    FROM sms_verification_codes
"#;

/// MySQL implementation of VerificationCodeRepository
pub struct MySqlVerificationCodeRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlVerificationCodeRepository {
    /// Create a new MySQL verification code repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to VerificationCode entity
    fn row_to_code(row: &sqlx::mysql::MySqlRow) -> Result<VerificationCode, DomainError> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;

        Ok(VerificationCode {
            id: Uuid::parse_str(&id).map_err(|e| column_error("id", e))?,
            phone_number: row
                .try_get("phone_number")
                .map_err(|e| column_error("phone_number", e))?,
            code: row.try_get("code").map_err(|e| column_error("code", e))?,
            attempts: row.try_get("attempts").map_err(|e| column_error("attempts", e))?,
            max_attempts: row
                .try_get("max_attempts")
                .map_err(|e| column_error("max_attempts", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| column_error("expires_at", e))?,
            verified_at: row
                .try_get::<Option<DateTime<Utc>>, _>("verified_at")
                .map_err(|e| column_error("verified_at", e))?,
            ip_address: row
                .try_get("ip_address")
                .map_err(|e| column_error("ip_address", e))?,
        })
    }
}

#[async_trait]
impl VerificationCodeRepository for MySqlVerificationCodeRepository {
    async fn create(&self, code: VerificationCode) -> Result<VerificationCode, DomainError> {
        let query = r#"
            INSERT INTO sms_verification_codes (
                id, phone_number, code, attempts, max_attempts,
                created_at, expires_at, verified_at, ip_address
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(code.id.to_string())
            .bind(&code.phone_number)
            .bind(&code.code)
            .bind(code.attempts)
            .bind(code.max_attempts)
            .bind(code.created_at)
            .bind(code.expires_at)
            .bind(code.verified_at)
            .bind(&code.ip_address)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error("verification code", e))?;

        Ok(code)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<VerificationCode>, DomainError> {
        let query = format!("{} WHERE id = ? LIMIT 1", SELECT_COLUMNS);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_read_error("Failed to find verification code", e))?;

        result.as_ref().map(Self::row_to_code).transpose()
    }

    async fn find_unexpired_match(
        &self,
        phone_number: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<VerificationCode>, DomainError> {
        let query = format!(
            "{} WHERE phone_number = ? AND code = ? AND expires_at > ? ORDER BY created_at ASC LIMIT 1",
            SELECT_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(phone_number)
            .bind(code)
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_read_error("Failed to look up verification code", e))?;

        result.as_ref().map(Self::row_to_code).transpose()
    }

    async fn find_latest_pending(
        &self,
        phone_number: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<VerificationCode>, DomainError> {
        let query = format!(
            "{} WHERE phone_number = ? AND verified_at IS NULL AND expires_at > ? \
             ORDER BY created_at DESC LIMIT 1",
            SELECT_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(phone_number)
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_read_error("Failed to find latest verification code", e))?;

        result.as_ref().map(Self::row_to_code).transpose()
    }

    async fn latest_created_at(
        &self,
        phone_number: &str,
    ) -> Result<Option<DateTime<Utc>>, DomainError> {
        let row = sqlx::query(
            "SELECT MAX(created_at) AS latest FROM sms_verification_codes WHERE phone_number = ?",
        )
        .bind(phone_number)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_read_error("Failed to read latest code timestamp", e))?;

        row.try_get::<Option<DateTime<Utc>>, _>("latest")
            .map_err(|e| column_error("latest", e))
    }

    async fn consume(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE sms_verification_codes
            SET verified_at = ?, attempts = attempts + 1
            WHERE id = ?
              AND verified_at IS NULL
              AND attempts < max_attempts
              AND expires_at > ?
        "#;

        let result = sqlx::query(query)
            .bind(now)
            .bind(id.to_string())
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error("verification code", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn record_failed_attempt(&self, id: Uuid) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE sms_verification_codes
            SET attempts = attempts + 1
            WHERE id = ?
              AND verified_at IS NULL
              AND attempts < max_attempts
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error("verification code", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn purge_expired(&self, before: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM sms_verification_codes WHERE expires_at < ?")
            .bind(before)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error("verification code", e))?;

        tracing::info!(
            event = "verification_codes_purged",
            purged = result.rows_affected(),
            "Purged expired verification codes"
        );
        Ok(result.rows_affected())
    }
}
