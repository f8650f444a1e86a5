//! Main verification service implementation

use chrono::{DateTime, Utc};
use std::sync::Arc;

use sb_shared::phone::mask_phone_number;

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::VerificationCodeRepository;

use super::config::VerificationServiceConfig;
use super::generator::{CodeGenerator, RandomCodeGenerator};
use super::traits::{SmsDelivery, SmsServiceTrait};
use super::types::{DispatchOutcome, IssuedCode};

/// Issues and consumes one-time codes stored in a [`VerificationCodeRepository`].
///
/// Phone numbers passed to this service must already be normalized; the
/// auth service normalizes exactly once at the boundary.
pub struct VerificationService<R: VerificationCodeRepository, S: SmsServiceTrait> {
    /// Code storage
    repository: Arc<R>,
    /// SMS service for sending messages
    sms_service: Arc<S>,
    /// Code source
    generator: Arc<dyn CodeGenerator>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<R: VerificationCodeRepository, S: SmsServiceTrait> VerificationService<R, S> {
    /// Create a new verification service
    pub fn new(repository: Arc<R>, sms_service: Arc<S>, config: VerificationServiceConfig) -> Self {
        Self {
            repository,
            sms_service,
            generator: Arc::new(RandomCodeGenerator),
            config,
        }
    }

    /// Replace the code generator
    pub fn with_generator(mut self, generator: Arc<dyn CodeGenerator>) -> Self {
        self.generator = generator;
        self
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    pub fn sms_service(&self) -> &Arc<S> {
        &self.sms_service
    }

    /// Generate, persist and dispatch a new code.
    ///
    /// The record is stored before dispatch and survives a failed dispatch.
    /// A generated code that collides with a stored `(phone, code)` pair is
    /// replaced with a fresh one.
    pub async fn issue_code(
        &self,
        phone_number: &str,
        ip_address: Option<String>,
    ) -> DomainResult<IssuedCode> {
        let record = self.persist_new_code(phone_number, ip_address).await?;

        tracing::info!(
            phone = %mask_phone_number(phone_number),
            code_id = %record.id,
            expires_at = %record.expires_at,
            event = "verification_code_issued",
            "Issued verification code"
        );

        let dispatch = self.dispatch(&record).await;

        Ok(IssuedCode {
            id: record.id,
            phone_number: record.phone_number.clone(),
            expires_at: record.expires_at,
            exposed_code: self.config.expose_code.then(|| record.code.clone()),
            dispatch,
        })
    }

    /// Validate a submitted code and consume it.
    ///
    /// Lookup is by `(phone, code)` among unexpired records, oldest first.
    /// On a miss, the guess is charged to the phone's newest pending record so
    /// repeated wrong codes exhaust it; once exhausted, every later call
    /// reports too many attempts until a new code is issued. The final transition is a conditional
    /// update, so two concurrent callers cannot both consume the same code.
    pub async fn consume_code(&self, phone_number: &str, code: &str) -> DomainResult<VerificationCode> {
        let now = Utc::now();

        let record = match self
            .repository
            .find_unexpired_match(phone_number, code, now)
            .await?
        {
            Some(record) => record,
            None => return Err(self.charge_wrong_guess(phone_number, now).await?.into()),
        };

        if record.is_verified() {
            tracing::warn!(
                phone = %mask_phone_number(phone_number),
                code_id = %record.id,
                event = "verification_code_reused",
                "Verification code already used"
            );
            return Err(AuthError::CodeAlreadyUsed.into());
        }

        if record.is_exhausted() {
            return Err(AuthError::TooManyAttempts.into());
        }

        if self.repository.consume(record.id, now).await? {
            tracing::info!(
                phone = %mask_phone_number(phone_number),
                code_id = %record.id,
                event = "verification_code_consumed",
                "Verification code accepted"
            );
            let mut consumed = record;
            consumed.verified_at = Some(now);
            consumed.attempts += 1;
            return Ok(consumed);
        }

        // Lost a race with another verification of the same record
        let current = self.repository.find_by_id(record.id).await?;
        Err(match current {
            Some(c) if c.is_verified() => AuthError::CodeAlreadyUsed,
            Some(c) if c.is_exhausted() => AuthError::TooManyAttempts,
            _ => AuthError::InvalidOrExpiredCode,
        }
        .into())
    }

    async fn persist_new_code(
        &self,
        phone_number: &str,
        ip_address: Option<String>,
    ) -> DomainResult<VerificationCode> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let candidate = VerificationCode::new(
                phone_number,
                self.generator.generate(),
                Utc::now(),
                self.config.code_ttl(),
                self.config.max_attempts,
                ip_address.clone(),
            );

            match self.repository.create(candidate).await {
                Ok(record) => return Ok(record),
                Err(DomainError::Conflict { .. }) if attempt < self.config.max_generation_attempts => {
                    tracing::debug!(
                        phone = %mask_phone_number(phone_number),
                        attempt,
                        "Generated code collided with a stored one, regenerating"
                    );
                }
                Err(DomainError::Conflict { .. }) => {
                    return Err(DomainError::Internal {
                        message: "could not allocate a unique verification code".to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn dispatch(&self, record: &VerificationCode) -> DispatchOutcome {
        let outcome = match self
            .sms_service
            .send_verification_code(&record.phone_number, &record.code)
            .await
        {
            Ok(SmsDelivery::Sent { message_id }) => DispatchOutcome::Sent { message_id },
            Ok(SmsDelivery::Simulated) => DispatchOutcome::Simulated,
            Err(reason) => DispatchOutcome::DispatchFailed { reason },
        };

        match &outcome {
            DispatchOutcome::DispatchFailed { reason } => tracing::warn!(
                phone = %mask_phone_number(&record.phone_number),
                code_id = %record.id,
                provider = self.sms_service.provider_name(),
                error = %reason,
                event = "sms_dispatch_failed",
                "SMS dispatch failed; verification code remains valid"
            ),
            other => tracing::debug!(
                code_id = %record.id,
                outcome = other.as_str(),
                event = "sms_dispatched",
                "SMS dispatch finished"
            ),
        }

        outcome
    }

    async fn charge_wrong_guess(
        &self,
        phone_number: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<AuthError> {
        let Some(target) = self.repository.find_latest_pending(phone_number, now).await? else {
            return Ok(AuthError::InvalidOrExpiredCode);
        };

        if target.is_exhausted() {
            return Ok(AuthError::TooManyAttempts);
        }

        // A lost race still leaves the record exhausted or verified
        self.repository.record_failed_attempt(target.id).await?;

        let exhausted = self
            .repository
            .find_by_id(target.id)
            .await?
            .map(|c| c.is_exhausted() && !c.is_verified())
            .unwrap_or(false);

        if exhausted {
            tracing::warn!(
                phone = %mask_phone_number(phone_number),
                code_id = %target.id,
                event = "verification_code_exhausted",
                "Verification attempts exhausted"
            );
            Ok(AuthError::TooManyAttempts)
        } else {
            tracing::debug!(
                phone = %mask_phone_number(phone_number),
                code_id = %target.id,
                "Wrong verification code submitted"
            );
            Ok(AuthError::InvalidOrExpiredCode)
        }
    }
}
