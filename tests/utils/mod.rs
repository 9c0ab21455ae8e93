pub mod builders;
pub mod mocks;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use builders::{linked_game, stale_game, unlinked_game, FeedGameBuilder};
#[allow(unused_imports)]
pub use mocks::ScriptedFeed;
#[allow(unused_imports)]
pub use setup::{TestSetup, TestSetupBuilder};
