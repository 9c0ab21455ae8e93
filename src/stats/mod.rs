pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use models::SeasonStats;
pub use repository::{
    InMemorySeasonStatsRepository, PostgresSeasonStatsRepository, SeasonStatsRepository,
};
pub use service::SeasonStatsAggregator;
