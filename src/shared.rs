use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::feed::ScoreboardFeed;
use crate::game::repository::GameRepository;
use crate::grading::repository::ProcessingEventRepository;
use crate::pick::repository::PickRepository;
use crate::scoring::repository::{LeagueDirectory, ScoringRulesRepository};
use crate::stats::repository::SeasonStatsRepository;
use crate::stats::SeasonStatsAggregator;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub games: Arc<dyn GameRepository>,
    pub picks: Arc<dyn PickRepository>,
    pub events: Arc<dyn ProcessingEventRepository>,
    pub scoring_rules: Arc<dyn ScoringRulesRepository>,
    pub season_stats: Arc<dyn SeasonStatsRepository>,
    pub leagues: Arc<dyn LeagueDirectory>,
    pub feed: Arc<dyn ScoreboardFeed>,
    pub aggregator: Arc<SeasonStatsAggregator>,
}

impl AppState {
    pub fn new(
        games: Arc<dyn GameRepository>,
        picks: Arc<dyn PickRepository>,
        events: Arc<dyn ProcessingEventRepository>,
        scoring_rules: Arc<dyn ScoringRulesRepository>,
        season_stats: Arc<dyn SeasonStatsRepository>,
        leagues: Arc<dyn LeagueDirectory>,
        feed: Arc<dyn ScoreboardFeed>,
    ) -> Self {
        // The aggregator is long-lived so its per-user locks serialize
        // recomputes across concurrent grading runs.
        let aggregator = Arc::new(SeasonStatsAggregator::new(
            Arc::clone(&picks),
            Arc::clone(&season_stats),
        ));

        Self {
            games,
            picks,
            events,
            scoring_rules,
            season_stats,
            leagues,
            feed,
            aggregator,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Feed error: {0}")]
    Feed(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Feed(msg) => (StatusCode::BAD_GATEWAY, format!("Feed error: {}", msg)),
            AppError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
