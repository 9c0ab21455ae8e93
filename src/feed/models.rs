use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Feed lifecycle state as the external service reports it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FeedState {
    Pre,
    In,
    Post,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedGameStatus {
    pub name: String,
    pub state: FeedState,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedSide {
    pub abbreviation: String,
    pub score: Option<i32>,
}

/// Canonical per-game record normalized from the external scoreboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedGame {
    pub external_id: String,
    pub start_time: DateTime<Utc>,
    pub home: FeedSide,
    pub away: FeedSide,
    pub status: FeedGameStatus,
}

impl FeedGame {
    pub fn is_completed(&self) -> bool {
        self.status.completed
    }

    /// Both final scores, present only when the feed has them
    pub fn final_scores(&self) -> Option<(i32, i32)> {
        match (self.home.score, self.away.score) {
            (Some(home), Some(away)) => Some((home, away)),
            _ => None,
        }
    }
}
