use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::models::SeasonStats;
use crate::shared::AppError;

/// Trait for season-stats storage, keyed by (user, season)
#[async_trait]
pub trait SeasonStatsRepository: Send + Sync {
    async fn get_stats(
        &self,
        user_id: Uuid,
        season_id: Uuid,
    ) -> Result<Option<SeasonStats>, AppError>;

    /// Replaces the stored row for the (user, season) pair
    async fn upsert_stats(&self, stats: &SeasonStats) -> Result<(), AppError>;
}

/// In-memory implementation of SeasonStatsRepository for development and testing
pub struct InMemorySeasonStatsRepository {
    stats: Mutex<HashMap<(Uuid, Uuid), SeasonStats>>,
}

impl Default for InMemorySeasonStatsRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySeasonStatsRepository {
    pub fn new() -> Self {
        Self {
            stats: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl SeasonStatsRepository for InMemorySeasonStatsRepository {
    #[instrument(skip(self))]
    async fn get_stats(
        &self,
        user_id: Uuid,
        season_id: Uuid,
    ) -> Result<Option<SeasonStats>, AppError> {
        let stats = self.stats.lock().unwrap();
        Ok(stats.get(&(user_id, season_id)).cloned())
    }

    #[instrument(skip(self, stats))]
    async fn upsert_stats(&self, stats: &SeasonStats) -> Result<(), AppError> {
        let mut stored = self.stats.lock().unwrap();
        stored.insert((stats.user_id, stats.season_id), stats.clone());
        debug!(
            user_id = %stats.user_id,
            season_id = %stats.season_id,
            total_points = stats.total_points,
            "Season stats replaced"
        );
        Ok(())
    }
}

/// PostgreSQL implementation of the season-stats store
pub struct PostgresSeasonStatsRepository {
    pool: PgPool,
}

impl PostgresSeasonStatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SeasonStatsRepository for PostgresSeasonStatsRepository {
    #[instrument(skip(self))]
    async fn get_stats(
        &self,
        user_id: Uuid,
        season_id: Uuid,
    ) -> Result<Option<SeasonStats>, AppError> {
        use sqlx::Row;

        let row = sqlx::query(
            "SELECT user_id, season_id, total_picks, wins, losses, pushes, total_points, \
             current_streak, best_streak, worst_streak, updated_at \
             FROM season_stats WHERE user_id = $1 AND season_id = $2",
        )
        .bind(user_id)
        .bind(season_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to fetch season stats");
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|row| {
            let total_picks: i32 = row.get("total_picks");
            let wins: i32 = row.get("wins");
            let losses: i32 = row.get("losses");
            let pushes: i32 = row.get("pushes");
            SeasonStats {
                user_id: row.get("user_id"),
                season_id: row.get("season_id"),
                total_picks: total_picks as u32,
                wins: wins as u32,
                losses: losses as u32,
                pushes: pushes as u32,
                total_points: row.get("total_points"),
                current_streak: row.get("current_streak"),
                best_streak: row.get("best_streak"),
                worst_streak: row.get("worst_streak"),
                updated_at: row.get("updated_at"),
            }
        }))
    }

    #[instrument(skip(self, stats))]
    async fn upsert_stats(&self, stats: &SeasonStats) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO season_stats \
             (user_id, season_id, total_picks, wins, losses, pushes, total_points, \
              current_streak, best_streak, worst_streak, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             ON CONFLICT (user_id, season_id) DO UPDATE SET \
             total_picks = EXCLUDED.total_picks, wins = EXCLUDED.wins, \
             losses = EXCLUDED.losses, pushes = EXCLUDED.pushes, \
             total_points = EXCLUDED.total_points, current_streak = EXCLUDED.current_streak, \
             best_streak = EXCLUDED.best_streak, worst_streak = EXCLUDED.worst_streak, \
             updated_at = EXCLUDED.updated_at",
        )
        .bind(stats.user_id)
        .bind(stats.season_id)
        .bind(stats.total_picks as i32)
        .bind(stats.wins as i32)
        .bind(stats.losses as i32)
        .bind(stats.pushes as i32)
        .bind(stats.total_points)
        .bind(stats.current_streak)
        .bind(stats.best_streak)
        .bind(stats.worst_streak)
        .bind(stats.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, user_id = %stats.user_id, "Failed to upsert season stats");
            AppError::DatabaseError(e.to_string())
        })?;

        debug!(user_id = %stats.user_id, season_id = %stats.season_id, "Season stats upserted");
        Ok(())
    }
}
