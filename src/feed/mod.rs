pub mod client;
mod errors;
pub mod models;

pub use client::{HttpFeedClient, ScoreboardFeed, FIRST_WEEK, LAST_WEEK};
pub use errors::FeedError;
pub use models::{FeedGame, FeedGameStatus, FeedSide, FeedState};
