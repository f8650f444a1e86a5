//! In-memory favorite team repository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::favorite_team::FavoriteTeam;
use crate::errors::DomainError;

use super::trait_::FavoriteTeamRepository;

/// Selections grouped by user
#[derive(Clone, Default)]
pub struct InMemoryFavoriteTeamRepository {
    selections: Arc<RwLock<HashMap<Uuid, Vec<FavoriteTeam>>>>,
}

impl InMemoryFavoriteTeamRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FavoriteTeamRepository for InMemoryFavoriteTeamRepository {
    async fn replace_for_user(
        &self,
        user_id: Uuid,
        teams: Vec<FavoriteTeam>,
    ) -> Result<usize, DomainError> {
        let mut selections = self.selections.write().await;
        let count = teams.len();
        if teams.is_empty() {
            selections.remove(&user_id);
        } else {
            selections.insert(user_id, teams);
        }
        Ok(count)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<FavoriteTeam>, DomainError> {
        let selections = self.selections.read().await;
        Ok(selections.get(&user_id).cloned().unwrap_or_default())
    }
}
