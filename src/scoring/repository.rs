use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::models::ScoringRules;
use crate::shared::AppError;

/// Trait for scoring rules storage. Rules are created lazily with league
/// defaults the first time a league is read.
#[async_trait]
pub trait ScoringRulesRepository: Send + Sync {
    async fn get_or_create(&self, league_id: Uuid) -> Result<ScoringRules, AppError>;
    async fn upsert(&self, rules: &ScoringRules) -> Result<(), AppError>;
}

/// Resolves which league's rules govern a season. League and membership
/// management live outside this service; this is the read-only seam.
#[async_trait]
pub trait LeagueDirectory: Send + Sync {
    async fn league_for_season(&self, season_id: Uuid) -> Result<Option<Uuid>, AppError>;
}

/// In-memory implementation of ScoringRulesRepository for development and testing
pub struct InMemoryScoringRulesRepository {
    rules: Mutex<HashMap<Uuid, ScoringRules>>,
}

impl Default for InMemoryScoringRulesRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryScoringRulesRepository {
    pub fn new() -> Self {
        Self {
            rules: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl ScoringRulesRepository for InMemoryScoringRulesRepository {
    #[instrument(skip(self))]
    async fn get_or_create(&self, league_id: Uuid) -> Result<ScoringRules, AppError> {
        let mut rules = self.rules.lock().unwrap();
        let entry = rules
            .entry(league_id)
            .or_insert_with(|| ScoringRules::default_for_league(league_id));
        debug!(league_id = %league_id, "Scoring rules resolved");
        Ok(entry.clone())
    }

    #[instrument(skip(self, rules))]
    async fn upsert(&self, rules: &ScoringRules) -> Result<(), AppError> {
        let mut stored = self.rules.lock().unwrap();
        stored.insert(rules.league_id, rules.clone());
        debug!(league_id = %rules.league_id, "Scoring rules updated");
        Ok(())
    }
}

/// In-memory season-to-league mapping for development and testing
pub struct InMemoryLeagueDirectory {
    seasons: Mutex<HashMap<Uuid, Uuid>>,
}

impl Default for InMemoryLeagueDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLeagueDirectory {
    pub fn new() -> Self {
        Self {
            seasons: Mutex::new(HashMap::new()),
        }
    }

    pub fn assign(&self, season_id: Uuid, league_id: Uuid) {
        self.seasons.lock().unwrap().insert(season_id, league_id);
    }
}

#[async_trait]
impl LeagueDirectory for InMemoryLeagueDirectory {
    #[instrument(skip(self))]
    async fn league_for_season(&self, season_id: Uuid) -> Result<Option<Uuid>, AppError> {
        let seasons = self.seasons.lock().unwrap();
        Ok(seasons.get(&season_id).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_read_creates_defaults() {
        let repo = InMemoryScoringRulesRepository::new();
        let league = Uuid::new_v4();

        let rules = repo.get_or_create(league).await.unwrap();
        assert_eq!(rules, ScoringRules::default_for_league(league));
    }

    #[tokio::test]
    async fn upsert_overrides_defaults_for_later_reads() {
        let repo = InMemoryScoringRulesRepository::new();
        let league = Uuid::new_v4();

        let mut rules = repo.get_or_create(league).await.unwrap();
        rules.streak_bonus = 2;
        rules.weekly_winner_bonus = 5;
        repo.upsert(&rules).await.unwrap();

        let reread = repo.get_or_create(league).await.unwrap();
        assert_eq!(reread.streak_bonus, 2);
        assert_eq!(reread.weekly_winner_bonus, 5);
    }

    #[tokio::test]
    async fn unmapped_season_has_no_league() {
        let directory = InMemoryLeagueDirectory::new();
        assert!(directory
            .league_for_season(Uuid::new_v4())
            .await
            .unwrap()
            .is_none());

        let season = Uuid::new_v4();
        let league = Uuid::new_v4();
        directory.assign(season, league);
        assert_eq!(
            directory.league_for_season(season).await.unwrap(),
            Some(league)
        );
    }
}
