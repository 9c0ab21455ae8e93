pub mod models;
pub mod repository;
pub mod streak;

pub use models::ScoringRules;
pub use repository::{
    InMemoryLeagueDirectory, InMemoryScoringRulesRepository, LeagueDirectory,
    ScoringRulesRepository,
};
pub use streak::{streak_bonus, streaks, streaks_from_picks, StreakSummary};
