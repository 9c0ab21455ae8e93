use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::models::{Pick, PickResult};
use crate::shared::AppError;

/// Trait for pick repository operations
#[async_trait]
pub trait PickRepository: Send + Sync {
    async fn create_pick(&self, pick: &Pick) -> Result<(), AppError>;
    async fn get_pick(&self, pick_id: Uuid) -> Result<Option<Pick>, AppError>;

    /// Ungraded picks for one game, the grading engine's work list
    async fn pending_for_game(&self, game_id: Uuid) -> Result<Vec<Pick>, AppError>;

    /// Writes a pick's result and awarded points
    async fn record_result(
        &self,
        pick_id: Uuid,
        result: PickResult,
        points: i32,
    ) -> Result<(), AppError>;

    /// All graded picks for a user's season, the aggregation input
    async fn graded_for_user_season(
        &self,
        user_id: Uuid,
        season_id: Uuid,
    ) -> Result<Vec<Pick>, AppError>;

    /// All graded picks in a week, the standings input
    async fn graded_for_week(&self, season_id: Uuid, week: u8) -> Result<Vec<Pick>, AppError>;
}

/// In-memory implementation of PickRepository for development and testing
pub struct InMemoryPickRepository {
    picks: Mutex<HashMap<Uuid, Pick>>,
}

impl Default for InMemoryPickRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPickRepository {
    pub fn new() -> Self {
        Self {
            picks: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl PickRepository for InMemoryPickRepository {
    #[instrument(skip(self, pick))]
    async fn create_pick(&self, pick: &Pick) -> Result<(), AppError> {
        let mut picks = self.picks.lock().unwrap();
        if picks.contains_key(&pick.id) {
            warn!(pick_id = %pick.id, "Pick already exists in memory");
            return Err(AppError::DatabaseError("Pick already exists".to_string()));
        }
        picks.insert(pick.id, pick.clone());
        debug!(pick_id = %pick.id, user_id = %pick.user_id, "Pick created in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_pick(&self, pick_id: Uuid) -> Result<Option<Pick>, AppError> {
        let picks = self.picks.lock().unwrap();
        Ok(picks.get(&pick_id).cloned())
    }

    #[instrument(skip(self))]
    async fn pending_for_game(&self, game_id: Uuid) -> Result<Vec<Pick>, AppError> {
        let picks = self.picks.lock().unwrap();
        let mut pending: Vec<Pick> = picks
            .values()
            .filter(|p| p.game_id == game_id && p.result == PickResult::Pending)
            .cloned()
            .collect();
        // Deterministic grading order for stable logs and summaries
        pending.sort_by_key(|p| (p.created_at, p.id));
        debug!(game_id = %game_id, count = pending.len(), "Pending picks loaded");
        Ok(pending)
    }

    #[instrument(skip(self))]
    async fn record_result(
        &self,
        pick_id: Uuid,
        result: PickResult,
        points: i32,
    ) -> Result<(), AppError> {
        let mut picks = self.picks.lock().unwrap();
        let pick = picks
            .get_mut(&pick_id)
            .ok_or_else(|| AppError::NotFound("Pick not found".to_string()))?;
        pick.result = result;
        pick.points_awarded = points;
        debug!(pick_id = %pick_id, result = %result, points, "Pick graded");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn graded_for_user_season(
        &self,
        user_id: Uuid,
        season_id: Uuid,
    ) -> Result<Vec<Pick>, AppError> {
        let picks = self.picks.lock().unwrap();
        let mut graded: Vec<Pick> = picks
            .values()
            .filter(|p| {
                p.user_id == user_id && p.season_id == season_id && p.result.is_graded()
            })
            .cloned()
            .collect();
        graded.sort_by_key(|p| (p.created_at, p.id));
        Ok(graded)
    }

    #[instrument(skip(self))]
    async fn graded_for_week(&self, season_id: Uuid, week: u8) -> Result<Vec<Pick>, AppError> {
        let picks = self.picks.lock().unwrap();
        let mut graded: Vec<Pick> = picks
            .values()
            .filter(|p| p.season_id == season_id && p.week == week && p.result.is_graded())
            .cloned()
            .collect();
        graded.sort_by_key(|p| (p.created_at, p.id));
        Ok(graded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pick::selection::{Selection, Side};

    fn pick_for(user_id: Uuid, game_id: Uuid, season_id: Uuid, week: u8) -> Pick {
        Pick::new(
            user_id,
            game_id,
            season_id,
            week,
            Selection::Moneyline { side: Side::Home },
        )
    }

    #[tokio::test]
    async fn pending_for_game_excludes_graded_picks() {
        let repo = InMemoryPickRepository::new();
        let game_id = Uuid::new_v4();
        let season_id = Uuid::new_v4();
        let graded = pick_for(Uuid::new_v4(), game_id, season_id, 1);
        let pending = pick_for(Uuid::new_v4(), game_id, season_id, 1);
        let other_game = pick_for(Uuid::new_v4(), Uuid::new_v4(), season_id, 1);

        repo.create_pick(&graded).await.unwrap();
        repo.create_pick(&pending).await.unwrap();
        repo.create_pick(&other_game).await.unwrap();
        repo.record_result(graded.id, PickResult::Win, 1)
            .await
            .unwrap();

        let found = repo.pending_for_game(game_id).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, pending.id);
    }

    #[tokio::test]
    async fn record_result_updates_points_and_result() {
        let repo = InMemoryPickRepository::new();
        let pick = pick_for(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), 1);
        repo.create_pick(&pick).await.unwrap();

        repo.record_result(pick.id, PickResult::Push, 0)
            .await
            .unwrap();

        let updated = repo.get_pick(pick.id).await.unwrap().unwrap();
        assert_eq!(updated.result, PickResult::Push);
        assert_eq!(updated.points_awarded, 0);
    }

    #[tokio::test]
    async fn graded_queries_filter_by_scope() {
        let repo = InMemoryPickRepository::new();
        let user = Uuid::new_v4();
        let season = Uuid::new_v4();

        let week1 = pick_for(user, Uuid::new_v4(), season, 1);
        let week2 = pick_for(user, Uuid::new_v4(), season, 2);
        let ungraded = pick_for(user, Uuid::new_v4(), season, 1);
        let other_user = pick_for(Uuid::new_v4(), Uuid::new_v4(), season, 1);

        for p in [&week1, &week2, &ungraded, &other_user] {
            repo.create_pick(p).await.unwrap();
        }
        repo.record_result(week1.id, PickResult::Win, 1)
            .await
            .unwrap();
        repo.record_result(week2.id, PickResult::Loss, 0)
            .await
            .unwrap();
        repo.record_result(other_user.id, PickResult::Win, 1)
            .await
            .unwrap();

        let user_season = repo.graded_for_user_season(user, season).await.unwrap();
        assert_eq!(user_season.len(), 2);

        let week_one = repo.graded_for_week(season, 1).await.unwrap();
        assert_eq!(week_one.len(), 2); // week1 + other_user, not the ungraded pick
        assert!(week_one.iter().all(|p| p.result.is_graded()));
    }
}
