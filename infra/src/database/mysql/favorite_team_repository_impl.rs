//! MySQL implementation of the FavoriteTeamRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySql, MySqlPool, QueryBuilder, Row};
use uuid::Uuid;

use sb_core::domain::entities::favorite_team::FavoriteTeam;
use sb_core::errors::DomainError;
use sb_core::repositories::FavoriteTeamRepository;

use super::{column_error, map_read_error, map_write_error};

/// MySQL implementation of FavoriteTeamRepository
pub struct MySqlFavoriteTeamRepository {
    pool: MySqlPool,
}

impl MySqlFavoriteTeamRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_favorite(row: &sqlx::mysql::MySqlRow) -> Result<FavoriteTeam, DomainError> {
        let user_id: String = row.try_get("user_id").map_err(|e| column_error("user_id", e))?;

        Ok(FavoriteTeam {
            user_id: Uuid::parse_str(&user_id).map_err(|e| column_error("user_id", e))?,
            team_id: row.try_get("team_id").map_err(|e| column_error("team_id", e))?,
            sport: row.try_get("sport").map_err(|e| column_error("sport", e))?,
            favorited_at: row
                .try_get::<DateTime<Utc>, _>("favorited_at")
                .map_err(|e| column_error("favorited_at", e))?,
        })
    }
}

#[async_trait]
impl FavoriteTeamRepository for MySqlFavoriteTeamRepository {
    async fn replace_for_user(
        &self,
        user_id: Uuid,
        teams: Vec<FavoriteTeam>,
    ) -> Result<usize, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_read_error("Failed to begin transaction", e))?;

        sqlx::query("DELETE FROM user_favorite_teams WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_write_error("favorite teams", e))?;

        let count = teams.len();
        if count > 0 {
            let mut builder: QueryBuilder<MySql> = QueryBuilder::new(
                "INSERT INTO user_favorite_teams (user_id, team_id, sport, favorited_at) ",
            );
            builder.push_values(teams, |mut row, team| {
                row.push_bind(team.user_id.to_string())
                    .push_bind(team.team_id)
                    .push_bind(team.sport)
                    .push_bind(team.favorited_at);
            });
            builder
                .build()
                .execute(&mut *tx)
                .await
                .map_err(|e| map_write_error("favorite teams", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| map_write_error("favorite teams", e))?;

        tracing::debug!(user_id = %user_id, count, "Replaced favorite teams");
        Ok(count)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<FavoriteTeam>, DomainError> {
        let rows = sqlx::query(
            "SELECT user_id, team_id, sport, favorited_at FROM user_favorite_teams \
             WHERE user_id = ? ORDER BY favorited_at ASC, team_id ASC",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_read_error("Failed to list favorite teams", e))?;

        rows.iter().map(Self::row_to_favorite).collect()
    }
}
