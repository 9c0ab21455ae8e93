use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use pickem::feed::{FeedGame, FeedGameStatus, FeedSide, FeedState};
use pickem::game::{Game, GameStatus};

// ============================================================================
// Test Data Builders
// ============================================================================

/// Builder for scripted feed games
pub struct FeedGameBuilder {
    external_id: String,
    start_time: DateTime<Utc>,
    home: FeedSide,
    away: FeedSide,
    completed: bool,
}

impl FeedGameBuilder {
    pub fn new(external_id: &str) -> Self {
        Self {
            external_id: external_id.to_string(),
            start_time: Utc::now() - Duration::hours(3),
            home: FeedSide {
                abbreviation: "KC".to_string(),
                score: None,
            },
            away: FeedSide {
                abbreviation: "BUF".to_string(),
                score: None,
            },
            completed: false,
        }
    }

    pub fn teams(mut self, home: &str, away: &str) -> Self {
        self.home.abbreviation = home.to_string();
        self.away.abbreviation = away.to_string();
        self
    }

    pub fn final_score(mut self, home: i32, away: i32) -> Self {
        self.home.score = Some(home);
        self.away.score = Some(away);
        self.completed = true;
        self
    }

    /// Completed per the feed but with scores missing, a malformed payload
    pub fn completed_without_scores(mut self) -> Self {
        self.completed = true;
        self
    }

    /// Feed still reports the game live, whatever the scores say
    pub fn feed_says_live(mut self) -> Self {
        self.completed = false;
        self
    }

    pub fn starting_at(mut self, start_time: DateTime<Utc>) -> Self {
        self.start_time = start_time;
        self
    }

    pub fn build(self) -> FeedGame {
        let (name, state) = if self.completed {
            ("STATUS_FINAL".to_string(), FeedState::Post)
        } else {
            ("STATUS_IN_PROGRESS".to_string(), FeedState::In)
        };
        FeedGame {
            external_id: self.external_id,
            start_time: self.start_time,
            home: self.home,
            away: self.away,
            status: FeedGameStatus {
                name,
                state,
                completed: self.completed,
            },
        }
    }
}

/// A scheduled game already linked to its feed id
pub fn linked_game(season_id: Uuid, week: u8, external_id: &str, home: &str, away: &str) -> Game {
    let mut game = Game::new(season_id, week, home, away, Utc::now() - Duration::hours(3));
    game.external_id = Some(external_id.to_string());
    game
}

/// A scheduled game the feed has never been matched against
pub fn unlinked_game(season_id: Uuid, week: u8, home: &str, away: &str) -> Game {
    Game::new(season_id, week, home, away, Utc::now() - Duration::hours(3))
}

/// A linked game whose kickoff is old enough to trip the staleness fallback
pub fn stale_game(season_id: Uuid, week: u8, external_id: &str, home: &str, away: &str) -> Game {
    let mut game = Game::new(season_id, week, home, away, Utc::now() - Duration::hours(6));
    game.external_id = Some(external_id.to_string());
    game.status = GameStatus::Live;
    game
}
