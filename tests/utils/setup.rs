use std::sync::Arc;
use uuid::Uuid;

use pickem::game::repository::InMemoryGameRepository;
use pickem::grading::repository::InMemoryProcessingEventRepository;
use pickem::grading::GradingService;
use pickem::pick::repository::InMemoryPickRepository;
use pickem::scoring::repository::{InMemoryLeagueDirectory, InMemoryScoringRulesRepository};
use pickem::scoring::ScoringRules;
use pickem::standings::WeeklyStandingsRanker;
use pickem::stats::repository::InMemorySeasonStatsRepository;
use pickem::stats::SeasonStatsAggregator;

use super::mocks::ScriptedFeed;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub feed: Arc<ScriptedFeed>,
    pub games: Arc<InMemoryGameRepository>,
    pub picks: Arc<InMemoryPickRepository>,
    pub events: Arc<InMemoryProcessingEventRepository>,
    pub scoring_rules: Arc<InMemoryScoringRulesRepository>,
    pub season_stats: Arc<InMemorySeasonStatsRepository>,
    pub leagues: Arc<InMemoryLeagueDirectory>,
    pub service: GradingService,
    pub ranker: WeeklyStandingsRanker,
    pub season_id: Uuid,
}

pub struct TestSetupBuilder {
    rules: Option<ScoringRules>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self { rules: None }
    }

    /// Overrides the season's scoring rules; the default awards one point
    /// per win with no bonuses.
    pub fn with_rules(mut self, rules: ScoringRules) -> Self {
        self.rules = Some(rules);
        self
    }

    pub async fn build(self) -> TestSetup {
        let season_id = match &self.rules {
            Some(rules) => rules.league_id,
            None => Uuid::new_v4(),
        };

        let feed = Arc::new(ScriptedFeed::new());
        let games = Arc::new(InMemoryGameRepository::new());
        let picks = Arc::new(InMemoryPickRepository::new());
        let events = Arc::new(InMemoryProcessingEventRepository::new());
        let scoring_rules = Arc::new(InMemoryScoringRulesRepository::new());
        let season_stats = Arc::new(InMemorySeasonStatsRepository::new());
        let leagues = Arc::new(InMemoryLeagueDirectory::new());

        if let Some(rules) = &self.rules {
            use pickem::scoring::repository::ScoringRulesRepository;
            scoring_rules.upsert(rules).await.unwrap();
        }

        let feed_dyn: Arc<dyn pickem::feed::ScoreboardFeed> = feed.clone();
        let games_dyn: Arc<dyn pickem::game::repository::GameRepository> = games.clone();
        let picks_dyn: Arc<dyn pickem::pick::repository::PickRepository> = picks.clone();
        let events_dyn: Arc<dyn pickem::grading::repository::ProcessingEventRepository> =
            events.clone();
        let rules_dyn: Arc<dyn pickem::scoring::repository::ScoringRulesRepository> =
            scoring_rules.clone();
        let stats_dyn: Arc<dyn pickem::stats::repository::SeasonStatsRepository> =
            season_stats.clone();
        let leagues_dyn: Arc<dyn pickem::scoring::repository::LeagueDirectory> = leagues.clone();

        let aggregator = Arc::new(SeasonStatsAggregator::new(picks_dyn.clone(), stats_dyn));

        let service = GradingService::new(
            feed_dyn,
            games_dyn,
            picks_dyn.clone(),
            events_dyn,
            rules_dyn.clone(),
            leagues_dyn.clone(),
            aggregator,
        );

        let ranker = WeeklyStandingsRanker::new(picks_dyn, rules_dyn, leagues_dyn);

        TestSetup {
            feed,
            games,
            picks,
            events,
            scoring_rules,
            season_stats,
            leagues,
            service,
            ranker,
            season_id,
        }
    }
}

impl Default for TestSetupBuilder {
    fn default() -> Self {
        Self::new()
    }
}
