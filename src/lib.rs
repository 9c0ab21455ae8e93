// Library crate for the pick'em grading pipeline
// This file exposes the public API for integration tests

pub mod feed;
pub mod game;
pub mod grading;
pub mod pick;
pub mod scoring;
pub mod shared;
pub mod standings;
pub mod stats;

// Re-export commonly used types for easier access in tests
pub use feed::{FeedGame, HttpFeedClient, ScoreboardFeed};
pub use game::{Game, GameStatus};
pub use grading::{GradingRunSummary, GradingService, ProcessingEvent};
pub use pick::{BetType, Pick, PickResult, Selection};
pub use scoring::ScoringRules;
pub use shared::{AppError, AppState};
pub use standings::{WeeklyStanding, WeeklyStandingsRanker};
pub use stats::{SeasonStats, SeasonStatsAggregator};
