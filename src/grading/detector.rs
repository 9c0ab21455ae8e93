use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::errors::GradingError;
use super::repository::ProcessingEventRepository;
use crate::feed::FeedGame;
use crate::game::{Game, GameRepository, GameStatus};

/// Finds feed games that finished since the last pipeline run and resolves
/// them to internal records. The processing-event store is the memory of
/// what has already been handled.
pub struct CompletionDetector {
    games: Arc<dyn GameRepository>,
    events: Arc<dyn ProcessingEventRepository>,
}

/// Split of a week's scoreboard into finished games and the subset that
/// still needs grading
#[derive(Debug, Default)]
pub struct Detection {
    pub completed: Vec<FeedGame>,
    pub newly_completed: Vec<FeedGame>,
}

impl CompletionDetector {
    pub fn new(games: Arc<dyn GameRepository>, events: Arc<dyn ProcessingEventRepository>) -> Self {
        Self { games, events }
    }

    /// Classifies the week's feed games. A game counts as finished when the
    /// feed flags it completed, or when the linked internal game is stale
    /// (past the four-hour fallback window with no update). Per-game store
    /// errors are logged and that game is left for the next run.
    #[instrument(skip(self, feed_games))]
    pub async fn detect(&self, feed_games: &[FeedGame], now: DateTime<Utc>) -> Detection {
        let mut detection = Detection::default();

        for feed_game in feed_games {
            let finished = feed_game.is_completed()
                || self.is_stale_completed(feed_game, now).await;
            if !finished {
                continue;
            }
            detection.completed.push(feed_game.clone());

            match self.events.find_by_external_id(&feed_game.external_id).await {
                Ok(Some(_)) => {
                    debug!(external_id = %feed_game.external_id, "Game already processed, skipping");
                }
                Ok(None) => detection.newly_completed.push(feed_game.clone()),
                Err(err) => {
                    warn!(
                        external_id = %feed_game.external_id,
                        error = %err,
                        "Idempotency check failed, deferring game to a later run"
                    );
                }
            }
        }

        info!(
            completed = detection.completed.len(),
            newly_completed = detection.newly_completed.len(),
            "Completion detection finished"
        );
        detection
    }

    /// Resolves a finished feed game to its internal record: direct lookup
    /// by external id first, then the date fallback with the feed id
    /// backfilled for future direct hits.
    #[instrument(skip(self, feed_game), fields(external_id = %feed_game.external_id))]
    pub async fn resolve(&self, feed_game: &FeedGame) -> Result<Game, GradingError> {
        if let Some(game) = self
            .games
            .find_by_external_id(&feed_game.external_id)
            .await?
        {
            return Ok(game);
        }

        let date = feed_game.start_time.date_naive();
        let candidates = self.games.find_unlinked_on_date(date).await?;
        let matched = candidates.into_iter().find(|g| {
            g.home_team.eq_ignore_ascii_case(&feed_game.home.abbreviation)
                && g.away_team.eq_ignore_ascii_case(&feed_game.away.abbreviation)
        });

        match matched {
            Some(mut game) => {
                self.games
                    .link_external_id(game.id, &feed_game.external_id)
                    .await?;
                game.external_id = Some(feed_game.external_id.clone());
                info!(
                    game_id = %game.id,
                    external_id = %feed_game.external_id,
                    "Linked game to feed id via date fallback"
                );
                Ok(game)
            }
            None => Err(GradingError::GameResolution(
                feed_game.external_id.clone(),
            )),
        }
    }

    async fn is_stale_completed(&self, feed_game: &FeedGame, now: DateTime<Utc>) -> bool {
        match self
            .games
            .find_by_external_id(&feed_game.external_id)
            .await
        {
            Ok(Some(game)) => {
                let stale = game.status != GameStatus::Completed
                    && game.effective_status(now) == GameStatus::Completed;
                if stale {
                    info!(game_id = %game.id, "Game stale past fallback window, forcing completed");
                }
                stale
            }
            Ok(None) => false,
            Err(err) => {
                warn!(external_id = %feed_game.external_id, error = %err, "Staleness check failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{FeedGameStatus, FeedSide, FeedState};
    use crate::game::InMemoryGameRepository;
    use crate::grading::models::ProcessingEvent;
    use crate::grading::repository::InMemoryProcessingEventRepository;
    use chrono::Duration;
    use uuid::Uuid;

    fn feed_game(external_id: &str, home: &str, away: &str, completed: bool) -> FeedGame {
        FeedGame {
            external_id: external_id.to_string(),
            start_time: Utc::now() - Duration::hours(3),
            home: FeedSide {
                abbreviation: home.to_string(),
                score: Some(24),
            },
            away: FeedSide {
                abbreviation: away.to_string(),
                score: Some(17),
            },
            status: FeedGameStatus {
                name: if completed { "STATUS_FINAL" } else { "STATUS_IN_PROGRESS" }.to_string(),
                state: if completed { FeedState::Post } else { FeedState::In },
                completed,
            },
        }
    }

    fn detector() -> (
        CompletionDetector,
        Arc<InMemoryGameRepository>,
        Arc<InMemoryProcessingEventRepository>,
    ) {
        let games = Arc::new(InMemoryGameRepository::new());
        let events = Arc::new(InMemoryProcessingEventRepository::new());
        (
            CompletionDetector::new(games.clone(), events.clone()),
            games,
            events,
        )
    }

    #[tokio::test]
    async fn detect_splits_completed_and_already_processed() {
        let (detector, _games, events) = detector();
        let processed = feed_game("espn-1", "KC", "BUF", true);
        let fresh = feed_game("espn-2", "DAL", "NYG", true);
        let in_progress = feed_game("espn-3", "SEA", "SF", false);

        events
            .insert_event(&ProcessingEvent::failure("espn-1", "earlier failure"))
            .await
            .unwrap();

        let detection = detector
            .detect(
                &[processed, fresh, in_progress],
                Utc::now(),
            )
            .await;

        assert_eq!(detection.completed.len(), 2);
        assert_eq!(detection.newly_completed.len(), 1);
        assert_eq!(detection.newly_completed[0].external_id, "espn-2");
    }

    #[tokio::test]
    async fn stale_linked_game_counts_as_completed() {
        let (detector, games, _events) = detector();
        let mut game = Game::new(
            Uuid::new_v4(),
            1,
            "KC",
            "BUF",
            Utc::now() - Duration::hours(6),
        );
        game.external_id = Some("espn-stale".to_string());
        games.create_game(&game).await.unwrap();

        let mut fg = feed_game("espn-stale", "KC", "BUF", false);
        fg.start_time = game.start_time;

        let detection = detector.detect(&[fg], Utc::now()).await;
        assert_eq!(detection.newly_completed.len(), 1);
    }

    #[tokio::test]
    async fn resolve_prefers_direct_external_id_lookup() {
        let (detector, games, _events) = detector();
        let mut game = Game::new(Uuid::new_v4(), 1, "KC", "BUF", Utc::now());
        game.external_id = Some("espn-7".to_string());
        games.create_game(&game).await.unwrap();

        let resolved = detector
            .resolve(&feed_game("espn-7", "KC", "BUF", true))
            .await
            .unwrap();
        assert_eq!(resolved.id, game.id);
    }

    #[tokio::test]
    async fn resolve_falls_back_to_date_and_backfills_the_link() {
        let (detector, games, _events) = detector();
        let fg = feed_game("espn-8", "KC", "BUF", true);
        let game = Game::new(Uuid::new_v4(), 1, "kc", "buf", fg.start_time);
        games.create_game(&game).await.unwrap();

        let resolved = detector.resolve(&fg).await.unwrap();
        assert_eq!(resolved.id, game.id);
        assert_eq!(resolved.external_id.as_deref(), Some("espn-8"));

        // Backfill persisted: the next lookup is direct
        let direct = games.find_by_external_id("espn-8").await.unwrap().unwrap();
        assert_eq!(direct.id, game.id);
    }

    #[tokio::test]
    async fn resolve_fails_when_no_game_matches() {
        let (detector, games, _events) = detector();
        let fg = feed_game("espn-9", "KC", "BUF", true);
        // A game on the right date but with different teams
        let other = Game::new(Uuid::new_v4(), 1, "DAL", "NYG", fg.start_time);
        games.create_game(&other).await.unwrap();

        let result = detector.resolve(&fg).await;
        assert!(matches!(
            result.unwrap_err(),
            GradingError::GameResolution(id) if id == "espn-9"
        ));
    }
}
