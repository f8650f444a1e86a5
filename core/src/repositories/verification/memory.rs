//! In-memory verification code repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::DomainError;

use super::trait_::VerificationCodeRepository;

/// Verification code store backed by a vector behind a lock.
///
/// Every operation holds the lock for its whole duration, which gives the
/// conditional updates the same all-or-nothing behaviour as the SQL store.
#[derive(Clone, Default)]
pub struct InMemoryVerificationCodeRepository {
    codes: Arc<RwLock<Vec<VerificationCode>>>,
}

impl InMemoryVerificationCodeRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all stored records
    pub async fn all(&self) -> Vec<VerificationCode> {
        self.codes.read().await.clone()
    }
}

#[async_trait]
impl VerificationCodeRepository for InMemoryVerificationCodeRepository {
    async fn create(&self, code: VerificationCode) -> Result<VerificationCode, DomainError> {
        let mut codes = self.codes.write().await;
        if codes
            .iter()
            .any(|c| c.phone_number == code.phone_number && c.code == code.code)
        {
            return Err(DomainError::Conflict {
                resource: "verification code".to_string(),
            });
        }
        codes.push(code.clone());
        Ok(code)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<VerificationCode>, DomainError> {
        let codes = self.codes.read().await;
        Ok(codes.iter().find(|c| c.id == id).cloned())
    }

    async fn find_unexpired_match(
        &self,
        phone_number: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<VerificationCode>, DomainError> {
        let codes = self.codes.read().await;
        Ok(codes
            .iter()
            .filter(|c| c.phone_number == phone_number && c.code == code && c.expires_at > now)
            .min_by_key(|c| c.created_at)
            .cloned())
    }

    async fn find_latest_pending(
        &self,
        phone_number: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<VerificationCode>, DomainError> {
        let codes = self.codes.read().await;
        Ok(codes
            .iter()
            .filter(|c| c.phone_number == phone_number && !c.is_verified() && c.expires_at > now)
            .max_by_key(|c| c.created_at)
            .cloned())
    }

    async fn latest_created_at(
        &self,
        phone_number: &str,
    ) -> Result<Option<DateTime<Utc>>, DomainError> {
        let codes = self.codes.read().await;
        Ok(codes
            .iter()
            .filter(|c| c.phone_number == phone_number)
            .map(|c| c.created_at)
            .max())
    }

    async fn consume(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, DomainError> {
        let mut codes = self.codes.write().await;
        match codes.iter_mut().find(|c| c.id == id) {
            Some(code) if code.is_usable(now) => {
                code.verified_at = Some(now);
                code.attempts += 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn record_failed_attempt(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut codes = self.codes.write().await;
        match codes.iter_mut().find(|c| c.id == id) {
            Some(code) if !code.is_verified() && !code.is_exhausted() => {
                code.attempts += 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn purge_expired(&self, before: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut codes = self.codes.write().await;
        let original = codes.len();
        codes.retain(|c| c.expires_at >= before);
        Ok((original - codes.len()) as u64)
    }
}
