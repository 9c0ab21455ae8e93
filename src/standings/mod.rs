pub mod handlers;
pub mod models;
pub mod service;

pub use models::WeeklyStanding;
pub use service::WeeklyStandingsRanker;
