//! A team a user picked during onboarding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// League recorded for selections made through onboarding
pub const DEFAULT_SPORT: &str = "nfl";

/// Most teams accepted in one selection
pub const MAX_FAVORITE_TEAMS: usize = 64;

/// One `(user, team)` selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteTeam {
    pub user_id: Uuid,

    /// Identifier from the team catalogue
    pub team_id: i64,

    pub sport: String,

    pub favorited_at: DateTime<Utc>,
}

impl FavoriteTeam {
    pub fn new(user_id: Uuid, team_id: i64, sport: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            team_id,
            sport: sport.into(),
            favorited_at: now,
        }
    }
}
