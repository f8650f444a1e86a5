//! Main authentication service implementation

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use sb_shared::phone::{mask_phone_number, normalize_phone};

use crate::domain::entities::favorite_team::{FavoriteTeam, DEFAULT_SPORT, MAX_FAVORITE_TEAMS};
use crate::domain::entities::session::VerifiedUser;
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::{FavoriteTeamRepository, UserRepository, VerificationCodeRepository};
use crate::services::verification::{IssuedCode, SmsServiceTrait, VerificationService};

use super::rate_limiter::{RateLimitDecision, RateLimiterTrait};

/// Longest first name accepted by onboarding
pub const MAX_FIRST_NAME_LENGTH: usize = 100;

/// Authentication service for the phone sign-in flow
pub struct AuthService<U, C, S, R>
where
    U: UserRepository,
    C: VerificationCodeRepository,
    S: SmsServiceTrait,
    R: RateLimiterTrait,
{
    /// User repository for database operations
    user_repository: Arc<U>,
    /// Verification service for SMS code handling
    verification_service: Arc<VerificationService<C, S>>,
    /// Rate limiter for preventing abuse
    rate_limiter: Arc<R>,
    /// Onboarding team selections
    favorite_teams: Arc<dyn FavoriteTeamRepository>,
}

impl<U, C, S, R> AuthService<U, C, S, R>
where
    U: UserRepository,
    C: VerificationCodeRepository,
    S: SmsServiceTrait,
    R: RateLimiterTrait,
{
    /// Create a new authentication service
    pub fn new(
        user_repository: Arc<U>,
        verification_service: Arc<VerificationService<C, S>>,
        rate_limiter: Arc<R>,
        favorite_teams: Arc<dyn FavoriteTeamRepository>,
    ) -> Self {
        Self {
            user_repository,
            verification_service,
            rate_limiter,
            favorite_teams,
        }
    }

    pub fn verification_service(&self) -> &Arc<VerificationService<C, S>> {
        &self.verification_service
    }

    /// Send a verification code to a phone number
    ///
    /// This method:
    /// 1. Normalizes the phone number
    /// 2. Rejects the request if a code was sent to it within the cooldown
    /// 3. Delegates to the verification service for generation, storage and dispatch
    pub async fn send_code(&self, raw_phone: &str, client_ip: Option<String>) -> DomainResult<IssuedCode> {
        let phone = normalize_phone(raw_phone);

        if let RateLimitDecision::Deny { retry_after_secs } =
            self.rate_limiter.check_send_allowed(&phone).await?
        {
            tracing::warn!(
                phone = %mask_phone_number(&phone),
                retry_after_secs,
                event = "rate_limit_exceeded",
                "Verification code request rate limit exceeded"
            );
            return Err(AuthError::RateLimited { retry_after_secs }.into());
        }

        self.verification_service.issue_code(&phone, client_ip).await
    }

    /// Verify a code and sign the user in, creating the account on first success
    pub async fn verify_code(&self, raw_phone: &str, code: &str) -> DomainResult<VerifiedUser> {
        let phone = normalize_phone(raw_phone);

        self.verification_service.consume_code(&phone, code).await?;

        let user = self.find_or_create_user(&phone).await?;

        tracing::info!(
            user_id = %user.id,
            phone = %mask_phone_number(&phone),
            onboarding_completed = user.onboarding_completed,
            event = "phone_verified",
            "Phone verification succeeded"
        );

        Ok(VerifiedUser::from_user(&user, &phone))
    }

    /// Load the user behind a session
    pub async fn current_user(&self, user_id: Uuid) -> DomainResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    /// Store the onboarding form for a signed-in user
    pub async fn complete_onboarding(&self, user_id: Uuid, first_name: &str) -> DomainResult<User> {
        let first_name = first_name.trim();
        if first_name.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "First name".to_string(),
            }
            .into());
        }
        let length = first_name.chars().count();
        if length > MAX_FIRST_NAME_LENGTH {
            return Err(ValidationError::InvalidLength {
                field: "First name".to_string(),
                max: MAX_FIRST_NAME_LENGTH,
                actual: length,
            }
            .into());
        }

        let user = self
            .user_repository
            .complete_onboarding(user_id, first_name, Utc::now())
            .await
            .map_err(|e| match e {
                DomainError::NotFound { .. } => AuthError::UserNotFound.into(),
                other => other,
            })?;

        tracing::info!(user_id = %user.id, event = "onboarding_completed", "Onboarding completed");
        Ok(user)
    }

    /// Replace the user's favorite teams with `team_ids`.
    ///
    /// Duplicate ids are stored once. Returns the number of stored selections.
    pub async fn save_favorite_teams(&self, user_id: Uuid, team_ids: &[i64]) -> DomainResult<usize> {
        if team_ids.is_empty() {
            return Err(ValidationError::EmptySelection {
                item: "team".to_string(),
            }
            .into());
        }
        if team_ids.iter().any(|id| *id <= 0) {
            return Err(ValidationError::InvalidFormat {
                field: "teamIds".to_string(),
            }
            .into());
        }

        let mut unique: Vec<i64> = Vec::with_capacity(team_ids.len());
        for id in team_ids {
            if !unique.contains(id) {
                unique.push(*id);
            }
        }
        if unique.len() > MAX_FAVORITE_TEAMS {
            return Err(ValidationError::InvalidLength {
                field: "teamIds".to_string(),
                max: MAX_FAVORITE_TEAMS,
                actual: unique.len(),
            }
            .into());
        }

        self.current_user(user_id).await?;

        let now = Utc::now();
        let selections = unique
            .into_iter()
            .map(|team_id| FavoriteTeam::new(user_id, team_id, DEFAULT_SPORT, now))
            .collect();
        let count = self.favorite_teams.replace_for_user(user_id, selections).await?;

        tracing::info!(user_id = %user_id, count, event = "favorite_teams_saved", "Saved favorite teams");
        Ok(count)
    }

    /// Teams the user currently follows
    pub async fn favorite_teams(&self, user_id: Uuid) -> DomainResult<Vec<FavoriteTeam>> {
        self.favorite_teams.list_for_user(user_id).await
    }

    async fn find_or_create_user(&self, phone: &str) -> DomainResult<User> {
        let now = Utc::now();

        if let Some(existing) = self.user_repository.find_by_phone(phone).await? {
            return self.user_repository.record_sign_in(existing.id, now).await;
        }

        match self.user_repository.create(User::new_verified(phone, now)).await {
            Ok(user) => {
                tracing::info!(
                    user_id = %user.id,
                    phone = %mask_phone_number(phone),
                    event = "user_created",
                    "Created user on first phone verification"
                );
                Ok(user)
            }
            // A concurrent verification for the same phone created the row first
            Err(DomainError::Conflict { .. }) => {
                let existing = self
                    .user_repository
                    .find_by_phone(phone)
                    .await?
                    .ok_or_else(|| DomainError::Internal {
                        message: "user vanished after phone conflict".to_string(),
                    })?;
                self.user_repository.record_sign_in(existing.id, now).await
            }
            Err(e) => Err(e),
        }
    }
}
