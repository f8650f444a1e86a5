//! Favorite team repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::favorite_team::FavoriteTeam;
use crate::errors::DomainError;

/// Persistence for the teams a user follows
#[async_trait]
pub trait FavoriteTeamRepository: Send + Sync {
    /// Replace every selection of `user_id` with `teams` in one unit of work.
    ///
    /// `teams` must not contain the same team twice.
    ///
    /// # Returns
    /// * `Ok(n)` - Number of selections now stored for the user
    async fn replace_for_user(
        &self,
        user_id: Uuid,
        teams: Vec<FavoriteTeam>,
    ) -> Result<usize, DomainError>;

    /// Selections of a user, oldest first
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<FavoriteTeam>, DomainError>;
}
