use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scoring::StreakSummary;

/// Cached per-(user, season) aggregate, replaced wholesale on every
/// recompute rather than patched incrementally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonStats {
    pub user_id: Uuid,
    pub season_id: Uuid,
    pub total_picks: u32,
    pub wins: u32,
    pub losses: u32,
    pub pushes: u32,
    pub total_points: i32,
    pub current_streak: i32,
    pub best_streak: i32,
    pub worst_streak: i32,
    pub updated_at: DateTime<Utc>,
}

impl SeasonStats {
    pub fn empty(user_id: Uuid, season_id: Uuid) -> Self {
        Self {
            user_id,
            season_id,
            total_picks: 0,
            wins: 0,
            losses: 0,
            pushes: 0,
            total_points: 0,
            current_streak: 0,
            best_streak: 0,
            worst_streak: 0,
            updated_at: Utc::now(),
        }
    }

    pub fn apply_streaks(&mut self, streaks: StreakSummary) {
        self.current_streak = streaks.current;
        self.best_streak = streaks.best;
        self.worst_streak = streaks.worst;
    }
}
