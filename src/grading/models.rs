use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::GameStatus;

/// One record per grading attempt on an external game. Its presence for an
/// external feed id is the idempotency gate: a recorded game is never
/// graded again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingEvent {
    pub id: Uuid,
    pub external_id: String,
    pub game_id: Option<Uuid>,
    pub previous_status: Option<GameStatus>,
    pub new_status: Option<GameStatus>,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub picks_processed: u32,
    pub points_awarded: i32,
    pub error: Option<String>,
    pub processed_at: DateTime<Utc>,
}

impl ProcessingEvent {
    pub fn success(
        external_id: impl Into<String>,
        game_id: Uuid,
        previous_status: GameStatus,
        home_score: i32,
        away_score: i32,
        picks_processed: u32,
        points_awarded: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            external_id: external_id.into(),
            game_id: Some(game_id),
            previous_status: Some(previous_status),
            new_status: Some(GameStatus::Completed),
            home_score: Some(home_score),
            away_score: Some(away_score),
            picks_processed,
            points_awarded,
            error: None,
            processed_at: Utc::now(),
        }
    }

    pub fn failure(external_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            external_id: external_id.into(),
            game_id: None,
            previous_status: None,
            new_status: None,
            home_score: None,
            away_score: None,
            picks_processed: 0,
            points_awarded: 0,
            error: Some(error.into()),
            processed_at: Utc::now(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Result of one "run grading pass for week W" invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingRunSummary {
    pub week: u8,
    /// Games on the scoreboard for the week
    pub games_seen: usize,
    /// Games finished according to the feed (or the staleness fallback)
    pub games_completed: usize,
    /// Games graded by this run (not previously processed)
    pub games_processed: usize,
    /// Completed games skipped without an event because their scores had
    /// not been published yet; picked up again on the next run
    pub games_deferred: usize,
    pub picks_graded: u32,
    /// Picks left pending because their selection text did not parse
    pub picks_unparseable: u32,
    pub points_awarded: i32,
    pub users_aggregated: usize,
    pub processed_external_ids: Vec<String>,
    pub failures: Vec<String>,
}

impl GradingRunSummary {
    pub fn new(week: u8, games_seen: usize) -> Self {
        Self {
            week,
            games_seen,
            games_completed: 0,
            games_processed: 0,
            games_deferred: 0,
            picks_graded: 0,
            picks_unparseable: 0,
            points_awarded: 0,
            users_aggregated: 0,
            processed_external_ids: Vec::new(),
            failures: Vec::new(),
        }
    }
}
