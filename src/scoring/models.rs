use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pick::PickResult;

pub const DEFAULT_WIN_POINTS: i32 = 1;
pub const DEFAULT_LOSS_POINTS: i32 = 0;
pub const DEFAULT_PUSH_POINTS: i32 = 0;
pub const DEFAULT_STREAK_BONUS: i32 = 0;
pub const DEFAULT_WEEKLY_WINNER_BONUS: i32 = 0;

/// Per-league point configuration. Admin-mutable between runs, read once
/// per grading run and passed by value through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRules {
    pub league_id: Uuid,
    pub win_points: i32,
    pub loss_points: i32,
    pub push_points: i32,
    /// Bonus points granted per completed three-win increment of a streak
    pub streak_bonus: i32,
    /// Bonus added to each user tied for the weekly top total
    pub weekly_winner_bonus: i32,
}

impl ScoringRules {
    pub fn default_for_league(league_id: Uuid) -> Self {
        Self {
            league_id,
            win_points: DEFAULT_WIN_POINTS,
            loss_points: DEFAULT_LOSS_POINTS,
            push_points: DEFAULT_PUSH_POINTS,
            streak_bonus: DEFAULT_STREAK_BONUS,
            weekly_winner_bonus: DEFAULT_WEEKLY_WINNER_BONUS,
        }
    }

    pub fn points_for(&self, result: PickResult) -> i32 {
        match result {
            PickResult::Win => self.win_points,
            PickResult::Loss => self.loss_points,
            PickResult::Push => self.push_points,
            PickResult::Pending => 0,
        }
    }
}
