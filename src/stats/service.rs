use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex as AsyncMutex, RwLock};
use tracing::{debug, error, instrument};
use uuid::Uuid;

use super::models::SeasonStats;
use super::repository::SeasonStatsRepository;
use crate::pick::{PickRepository, PickResult};
use crate::scoring::streaks_from_picks;
use crate::shared::AppError;

/// Recomputes a user's season aggregate from scratch after grading.
///
/// Full recomputation over all graded picks (never incremental deltas) is
/// deliberate: it self-corrects any historical grading fix on the next
/// pass. Recomputes for the same user are serialized through a per-user
/// lock so they cannot interleave with each other.
pub struct SeasonStatsAggregator {
    picks: Arc<dyn PickRepository>,
    stats: Arc<dyn SeasonStatsRepository>,
    user_locks: Arc<RwLock<HashMap<Uuid, Arc<AsyncMutex<()>>>>>,
}

impl SeasonStatsAggregator {
    pub fn new(picks: Arc<dyn PickRepository>, stats: Arc<dyn SeasonStatsRepository>) -> Self {
        Self {
            picks,
            stats,
            user_locks: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Rebuilds and stores the (user, season) aggregate
    #[instrument(skip(self))]
    pub async fn recompute(&self, user_id: Uuid, season_id: Uuid) -> Result<SeasonStats, AppError> {
        let user_lock = self.user_lock(user_id).await;
        let _guard = user_lock.lock().await;

        let graded = self.picks.graded_for_user_season(user_id, season_id).await?;

        let mut stats = SeasonStats::empty(user_id, season_id);
        for pick in &graded {
            stats.total_picks += 1;
            stats.total_points += pick.points_awarded;
            match pick.result {
                PickResult::Win => stats.wins += 1,
                PickResult::Loss => stats.losses += 1,
                PickResult::Push => stats.pushes += 1,
                PickResult::Pending => {}
            }
        }
        stats.apply_streaks(streaks_from_picks(&graded));
        stats.updated_at = Utc::now();

        self.stats.upsert_stats(&stats).await?;
        debug!(
            user_id = %user_id,
            season_id = %season_id,
            total_picks = stats.total_picks,
            total_points = stats.total_points,
            "Season stats recomputed"
        );
        Ok(stats)
    }

    /// Recomputes a batch of (user, season) pairs. One user's failure is
    /// logged and does not stop the rest; returns how many succeeded.
    #[instrument(skip(self, users))]
    pub async fn recompute_batch(&self, users: &[(Uuid, Uuid)]) -> usize {
        let mut succeeded = 0;
        for (user_id, season_id) in users {
            match self.recompute(*user_id, *season_id).await {
                Ok(_) => succeeded += 1,
                Err(err) => {
                    error!(
                        user_id = %user_id,
                        season_id = %season_id,
                        error = %err,
                        "Season stats aggregation failed"
                    );
                }
            }
        }
        succeeded
    }

    async fn user_lock(&self, user_id: Uuid) -> Arc<AsyncMutex<()>> {
        {
            let guard = self.user_locks.read().await;
            if let Some(lock) = guard.get(&user_id) {
                return lock.clone();
            }
        }

        let mut guard = self.user_locks.write().await;
        guard
            .entry(user_id)
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }
}
