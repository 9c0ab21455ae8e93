pub mod models;
pub mod repository;

pub use models::{Game, GameStatus, COMPLETION_FALLBACK_HOURS};
pub use repository::{GameRepository, InMemoryGameRepository};
