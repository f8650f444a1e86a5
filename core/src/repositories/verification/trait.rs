//! Verification code repository trait.
//!
//! The store is the only coordination point between concurrent requests, so
//! the mutating operations are expressed as conditional updates that report
//! whether they applied instead of read-modify-write sequences.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::DomainError;

/// Repository trait for verification code persistence operations
#[async_trait]
pub trait VerificationCodeRepository: Send + Sync {
    /// Insert a new code.
    ///
    /// # Returns
    /// * `Err(DomainError::Conflict)` - The `(phone_number, code)` pair already exists
    async fn create(&self, code: VerificationCode) -> Result<VerificationCode, DomainError>;

    /// Find a code by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<VerificationCode>, DomainError>;

    /// Find the oldest record matching `(phone_number, code)` with `expires_at > now`.
    ///
    /// Verified and exhausted records are still returned so the caller can
    /// report why they were rejected.
    async fn find_unexpired_match(
        &self,
        phone_number: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<VerificationCode>, DomainError>;

    /// Newest unverified record for the phone number with `expires_at > now`.
    ///
    /// Exhausted records are included so a wrong guess against one can be
    /// reported as such.
    async fn find_latest_pending(
        &self,
        phone_number: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<VerificationCode>, DomainError>;

    /// Creation time of the newest record for the phone number, regardless of state
    async fn latest_created_at(
        &self,
        phone_number: &str,
    ) -> Result<Option<DateTime<Utc>>, DomainError>;

    /// Mark the code verified and charge one attempt, only if it is unverified,
    /// unexpired and below its attempt cap.
    ///
    /// # Returns
    /// * `Ok(true)` - This call consumed the code
    /// * `Ok(false)` - The guard failed; another caller got there first
    async fn consume(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, DomainError>;

    /// Charge one failed attempt, only if the code is unverified and below its cap
    async fn record_failed_attempt(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Delete records that expired before `before`. Not used by request handling.
    async fn purge_expired(&self, before: DateTime<Utc>) -> Result<u64, DomainError>;
}
