use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One leaderboard row. Computed on read, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyStanding {
    pub user_id: Uuid,
    pub season_id: Uuid,
    pub week: u8,
    pub picks: u32,
    pub wins: u32,
    pub losses: u32,
    pub pushes: u32,
    pub base_points: i32,
    pub streak_bonus: i32,
    pub winner_bonus: i32,
    pub total_points: i32,
    pub rank: u32,
    pub weekly_winner: bool,
}
