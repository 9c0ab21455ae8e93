use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::models::{Game, GameStatus};
use crate::shared::AppError;

/// Trait for game repository operations
#[async_trait]
pub trait GameRepository: Send + Sync {
    async fn create_game(&self, game: &Game) -> Result<(), AppError>;
    async fn get_game(&self, game_id: Uuid) -> Result<Option<Game>, AppError>;

    /// Primary lookup used by the completion detector
    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<Game>, AppError>;

    /// Fallback lookup: games on a calendar date that have no feed id yet
    async fn find_unlinked_on_date(&self, date: NaiveDate) -> Result<Vec<Game>, AppError>;

    /// Backfills the feed id after a fallback match so future runs resolve directly
    async fn link_external_id(&self, game_id: Uuid, external_id: &str) -> Result<(), AppError>;

    /// Writes the final score and moves the game to completed
    async fn record_final_score(&self, game_id: Uuid, home: i32, away: i32)
        -> Result<(), AppError>;
}

/// In-memory implementation of GameRepository for development and testing
pub struct InMemoryGameRepository {
    games: Mutex<HashMap<Uuid, Game>>,
}

impl Default for InMemoryGameRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryGameRepository {
    pub fn new() -> Self {
        Self {
            games: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    #[instrument(skip(self, game))]
    async fn create_game(&self, game: &Game) -> Result<(), AppError> {
        let mut games = self.games.lock().unwrap();
        if games.contains_key(&game.id) {
            warn!(game_id = %game.id, "Game already exists in memory");
            return Err(AppError::DatabaseError("Game already exists".to_string()));
        }
        games.insert(game.id, game.clone());
        debug!(game_id = %game.id, "Game created in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_game(&self, game_id: Uuid) -> Result<Option<Game>, AppError> {
        let games = self.games.lock().unwrap();
        Ok(games.get(&game_id).cloned())
    }

    #[instrument(skip(self))]
    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<Game>, AppError> {
        let games = self.games.lock().unwrap();
        let game = games
            .values()
            .find(|g| g.external_id.as_deref() == Some(external_id))
            .cloned();
        debug!(external_id, found = game.is_some(), "External id lookup");
        Ok(game)
    }

    #[instrument(skip(self))]
    async fn find_unlinked_on_date(&self, date: NaiveDate) -> Result<Vec<Game>, AppError> {
        let games = self.games.lock().unwrap();
        let matches = games
            .values()
            .filter(|g| g.external_id.is_none() && g.start_time.date_naive() == date)
            .cloned()
            .collect();
        Ok(matches)
    }

    #[instrument(skip(self))]
    async fn link_external_id(&self, game_id: Uuid, external_id: &str) -> Result<(), AppError> {
        let mut games = self.games.lock().unwrap();
        let game = games
            .get_mut(&game_id)
            .ok_or_else(|| AppError::NotFound("Game not found".to_string()))?;
        game.external_id = Some(external_id.to_string());
        debug!(game_id = %game_id, external_id, "Linked game to feed id");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn record_final_score(
        &self,
        game_id: Uuid,
        home: i32,
        away: i32,
    ) -> Result<(), AppError> {
        let mut games = self.games.lock().unwrap();
        let game = games
            .get_mut(&game_id)
            .ok_or_else(|| AppError::NotFound("Game not found".to_string()))?;
        game.home_score = Some(home);
        game.away_score = Some(away);
        game.advance_status(GameStatus::Completed);
        debug!(game_id = %game_id, home, away, "Recorded final score");
        Ok(())
    }
}
