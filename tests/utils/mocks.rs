use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use pickem::feed::{FeedError, FeedGame, ScoreboardFeed};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Feed whose per-week scoreboards are scripted by the test. Weeks can be
/// rescripted between runs to simulate the feed changing over time, and a
/// week can be marked as down to simulate a total fetch failure.
pub struct ScriptedFeed {
    weeks: Mutex<HashMap<u8, Vec<FeedGame>>>,
    down_weeks: Mutex<Vec<u8>>,
}

impl ScriptedFeed {
    pub fn new() -> Self {
        Self {
            weeks: Mutex::new(HashMap::new()),
            down_weeks: Mutex::new(Vec::new()),
        }
    }

    pub fn script_week(&self, week: u8, games: Vec<FeedGame>) {
        self.weeks.lock().unwrap().insert(week, games);
    }

    pub fn mark_week_down(&self, week: u8) {
        self.down_weeks.lock().unwrap().push(week);
    }
}

impl Default for ScriptedFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScoreboardFeed for ScriptedFeed {
    async fn fetch_week(&self, week: u8) -> Result<Vec<FeedGame>, FeedError> {
        if self.down_weeks.lock().unwrap().contains(&week) {
            return Err(FeedError::Status(503));
        }
        Ok(self
            .weeks
            .lock()
            .unwrap()
            .get(&week)
            .cloned()
            .unwrap_or_default())
    }
}
