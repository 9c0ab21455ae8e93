use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

/// Hours after kickoff before an un-updated game is assumed finished.
pub const COMPLETION_FALLBACK_HOURS: i64 = 4;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Scheduled,
    Live,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: Uuid,
    pub season_id: Uuid,
    pub week: u8,
    /// Feed identifier, absent until the game has been linked
    pub external_id: Option<String>,
    pub home_team: String,
    pub away_team: String,
    pub start_time: DateTime<Utc>,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub status: GameStatus,
}

impl Game {
    pub fn new(
        season_id: Uuid,
        week: u8,
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            season_id,
            week,
            external_id: None,
            home_team: home_team.into(),
            away_team: away_team.into(),
            start_time,
            home_score: None,
            away_score: None,
            status: GameStatus::Scheduled,
        }
    }

    /// Status is monotonic; a transition can only move forward
    pub fn advance_status(&mut self, next: GameStatus) {
        if next > self.status {
            self.status = next;
        }
    }

    /// Actual status with the time-based fallback applied: a game that has
    /// not been updated more than four hours past kickoff is treated as
    /// completed even if the feed never flipped it.
    pub fn effective_status(&self, now: DateTime<Utc>) -> GameStatus {
        if self.status != GameStatus::Completed
            && now - self.start_time > Duration::hours(COMPLETION_FALLBACK_HOURS)
        {
            GameStatus::Completed
        } else {
            self.status
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == GameStatus::Completed
    }
}
