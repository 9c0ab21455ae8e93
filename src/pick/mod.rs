pub mod models;
pub mod repository;
pub mod selection;

pub use models::{BetType, Pick, PickResult};
pub use repository::{InMemoryPickRepository, PickRepository};
pub use selection::{Selection, SelectionParseError, Side, TotalDirection};
