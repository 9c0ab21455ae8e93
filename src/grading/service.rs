use chrono::Utc;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use super::detector::CompletionDetector;
use super::engine;
use super::errors::GradingError;
use super::models::{GradingRunSummary, ProcessingEvent};
use super::repository::{EventInsert, ProcessingEventRepository};
use crate::feed::{FeedGame, ScoreboardFeed};
use crate::game::GameRepository;
use crate::pick::PickRepository;
use crate::scoring::repository::{LeagueDirectory, ScoringRulesRepository};
use crate::shared::AppState;
use crate::stats::SeasonStatsAggregator;

/// Orchestrates one grading pass: fetch the week's scoreboard, detect
/// newly-finished games, grade their pending picks and refresh season
/// aggregates for every affected user.
pub struct GradingService {
    feed: Arc<dyn ScoreboardFeed>,
    games: Arc<dyn GameRepository>,
    picks: Arc<dyn PickRepository>,
    events: Arc<dyn ProcessingEventRepository>,
    scoring_rules: Arc<dyn ScoringRulesRepository>,
    leagues: Arc<dyn LeagueDirectory>,
    aggregator: Arc<SeasonStatsAggregator>,
    detector: CompletionDetector,
}

struct ProcessedGame {
    picks_graded: u32,
    picks_unparseable: u32,
    points_awarded: i32,
}

impl GradingService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        feed: Arc<dyn ScoreboardFeed>,
        games: Arc<dyn GameRepository>,
        picks: Arc<dyn PickRepository>,
        events: Arc<dyn ProcessingEventRepository>,
        scoring_rules: Arc<dyn ScoringRulesRepository>,
        leagues: Arc<dyn LeagueDirectory>,
        aggregator: Arc<SeasonStatsAggregator>,
    ) -> Self {
        let detector = CompletionDetector::new(Arc::clone(&games), Arc::clone(&events));
        Self {
            feed,
            games,
            picks,
            events,
            scoring_rules,
            leagues,
            aggregator,
            detector,
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(
            Arc::clone(&state.feed),
            Arc::clone(&state.games),
            Arc::clone(&state.picks),
            Arc::clone(&state.events),
            Arc::clone(&state.scoring_rules),
            Arc::clone(&state.leagues),
            Arc::clone(&state.aggregator),
        )
    }

    /// Runs the grading pass for one week. Total feed failure fails the
    /// run; every other failure is contained to its game, pick or user.
    /// Safe to re-trigger: processed games are skipped via the event gate.
    #[instrument(skip(self))]
    pub async fn run_week(&self, week: u8) -> Result<GradingRunSummary, GradingError> {
        let feed_games = self.feed.fetch_week(week).await?;
        let mut summary = GradingRunSummary::new(week, feed_games.len());

        let detection = self.detector.detect(&feed_games, Utc::now()).await;
        summary.games_completed = detection.completed.len();

        // Users whose season aggregates must be refreshed after grading.
        // BTreeSet keeps the aggregation order deterministic.
        let mut affected: BTreeSet<(Uuid, Uuid)> = BTreeSet::new();

        // Strictly sequential per game: the check-then-record step is not
        // transactional, the store's uniqueness constraint covers runs
        // that overlap from separate invocations.
        for feed_game in &detection.newly_completed {
            match self.process_game(feed_game, &mut affected).await {
                Ok(processed) => {
                    summary.games_processed += 1;
                    summary.picks_graded += processed.picks_graded;
                    summary.picks_unparseable += processed.picks_unparseable;
                    summary.points_awarded += processed.points_awarded;
                    summary
                        .processed_external_ids
                        .push(feed_game.external_id.clone());
                }
                // Scores can lag the completed flag by a poll or two.
                // Recording an event here would block the game for good,
                // so leave it ungated for the next run.
                Err(GradingError::MissingScore(external_id)) => {
                    warn!(
                        external_id = %external_id,
                        "Completed game has no scores yet, deferring to a later run"
                    );
                    summary.games_deferred += 1;
                }
                Err(err) => {
                    error!(
                        external_id = %feed_game.external_id,
                        error = %err,
                        "Game processing failed"
                    );
                    self.record_failure(feed_game, &err).await;
                    summary
                        .failures
                        .push(format!("{}: {}", feed_game.external_id, err));
                }
            }
        }

        let users: Vec<(Uuid, Uuid)> = affected.into_iter().collect();
        let aggregated = self.aggregator.recompute_batch(&users).await;
        summary.users_aggregated = aggregated;

        info!(
            week,
            games_processed = summary.games_processed,
            picks_graded = summary.picks_graded,
            points_awarded = summary.points_awarded,
            failures = summary.failures.len(),
            "Grading pass finished"
        );
        Ok(summary)
    }

    async fn process_game(
        &self,
        feed_game: &FeedGame,
        affected: &mut BTreeSet<(Uuid, Uuid)>,
    ) -> Result<ProcessedGame, GradingError> {
        let game = self.detector.resolve(feed_game).await?;
        let (home_score, away_score) = feed_game
            .final_scores()
            .ok_or_else(|| GradingError::MissingScore(feed_game.external_id.clone()))?;

        let previous_status = game.status;
        self.games
            .record_final_score(game.id, home_score, away_score)
            .await?;

        let league_id = self
            .leagues
            .league_for_season(game.season_id)
            .await?
            .unwrap_or(game.season_id);
        let rules = self.scoring_rules.get_or_create(league_id).await?;

        let pending = self.picks.pending_for_game(game.id).await?;
        let mut processed = ProcessedGame {
            picks_graded: 0,
            picks_unparseable: 0,
            points_awarded: 0,
        };

        for pick in &pending {
            match pick.resolved_selection() {
                Ok(selection) => {
                    let grade = engine::grade(&selection, home_score, away_score, &rules);
                    self.picks
                        .record_result(pick.id, grade.result, grade.points)
                        .await?;
                    debug!(
                        pick_id = %pick.id,
                        result = %grade.result,
                        points = grade.points,
                        explanation = %grade.explanation,
                        "Pick graded"
                    );
                    processed.picks_graded += 1;
                    processed.points_awarded += grade.points;
                    affected.insert((pick.user_id, pick.season_id));
                }
                Err(err) => {
                    // Isolated to this pick: it stays pending with the
                    // reason logged, the rest of the game still grades
                    warn!(
                        pick_id = %pick.id,
                        selection = %pick.selection_text,
                        error = %err,
                        "Selection unparseable, pick left pending"
                    );
                    processed.picks_unparseable += 1;
                }
            }
        }

        let event = ProcessingEvent::success(
            feed_game.external_id.clone(),
            game.id,
            previous_status,
            home_score,
            away_score,
            processed.picks_graded,
            processed.points_awarded,
        );
        // Grading writes are idempotent per (pick, score), so losing this
        // race to a concurrent run cannot double-award anything
        if let EventInsert::AlreadyRecorded = self.events.insert_event(&event).await? {
            warn!(
                external_id = %feed_game.external_id,
                "Concurrent run recorded this game first"
            );
        }

        Ok(processed)
    }

    async fn record_failure(&self, feed_game: &FeedGame, err: &GradingError) {
        let event = ProcessingEvent::failure(feed_game.external_id.clone(), err.to_string());
        if let Err(insert_err) = self.events.insert_event(&event).await {
            error!(
                external_id = %feed_game.external_id,
                error = %insert_err,
                "Failed to record processing failure"
            );
        }
    }
}
