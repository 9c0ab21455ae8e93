use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::models::WeeklyStanding;
use crate::pick::{Pick, PickRepository, PickResult};
use crate::scoring::repository::{LeagueDirectory, ScoringRulesRepository};
use crate::scoring::{streak_bonus, streaks_from_picks};
use crate::shared::{AppError, AppState};

/// Builds the week's tie-broken leaderboard from already-graded picks
pub struct WeeklyStandingsRanker {
    picks: Arc<dyn PickRepository>,
    scoring_rules: Arc<dyn ScoringRulesRepository>,
    leagues: Arc<dyn LeagueDirectory>,
}

impl WeeklyStandingsRanker {
    pub fn new(
        picks: Arc<dyn PickRepository>,
        scoring_rules: Arc<dyn ScoringRulesRepository>,
        leagues: Arc<dyn LeagueDirectory>,
    ) -> Self {
        Self {
            picks,
            scoring_rules,
            leagues,
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(
            Arc::clone(&state.picks),
            Arc::clone(&state.scoring_rules),
            Arc::clone(&state.leagues),
        )
    }

    /// Two-pass ranking: rank on base + streak-bonus totals, mark everyone
    /// tied at the top as a weekly winner, then fold the winner bonus into
    /// their totals and rank again so the bonus shows in the final order.
    #[instrument(skip(self))]
    pub async fn standings(
        &self,
        season_id: Uuid,
        week: u8,
    ) -> Result<Vec<WeeklyStanding>, AppError> {
        let graded = self.picks.graded_for_week(season_id, week).await?;
        let league_id = self
            .leagues
            .league_for_season(season_id)
            .await?
            .unwrap_or(season_id);
        let rules = self.scoring_rules.get_or_create(league_id).await?;

        // BTreeMap keeps user iteration deterministic
        let mut per_user: BTreeMap<Uuid, Vec<Pick>> = BTreeMap::new();
        for pick in graded {
            per_user.entry(pick.user_id).or_default().push(pick);
        }

        let mut rows: Vec<WeeklyStanding> = per_user
            .into_iter()
            .map(|(user_id, picks)| {
                let mut row = WeeklyStanding {
                    user_id,
                    season_id,
                    week,
                    picks: picks.len() as u32,
                    wins: 0,
                    losses: 0,
                    pushes: 0,
                    base_points: 0,
                    streak_bonus: 0,
                    winner_bonus: 0,
                    total_points: 0,
                    rank: 0,
                    weekly_winner: false,
                };
                for pick in &picks {
                    row.base_points += pick.points_awarded;
                    match pick.result {
                        PickResult::Win => row.wins += 1,
                        PickResult::Loss => row.losses += 1,
                        PickResult::Push => row.pushes += 1,
                        PickResult::Pending => {}
                    }
                }
                // Week-local streak, scoped to this week's picks only
                let streaks = streaks_from_picks(&picks);
                row.streak_bonus = streak_bonus(rules.streak_bonus, streaks.current);
                row.total_points = row.base_points + row.streak_bonus;
                row
            })
            .collect();

        sort_and_rank(&mut rows);

        // Winner status is decided on the pre-bonus totals
        if let Some(top_total) = rows.first().map(|r| r.total_points) {
            for row in rows.iter_mut() {
                row.weekly_winner = row.total_points == top_total;
            }

            if rules.weekly_winner_bonus > 0 {
                for row in rows.iter_mut().filter(|r| r.weekly_winner) {
                    row.winner_bonus = rules.weekly_winner_bonus;
                    row.total_points += rules.weekly_winner_bonus;
                }
                // Second pass: the bonus must affect the final ordering
                sort_and_rank(&mut rows);
            }
        }

        debug!(
            season_id = %season_id,
            week,
            users = rows.len(),
            "Weekly standings computed"
        );
        Ok(rows)
    }
}

/// Sorts by total points then win count, with the user id as a stable
/// final tie-break, and assigns dense ranks: rows tied on total points
/// share a rank, the next distinct total takes `index + 1`.
fn sort_and_rank(rows: &mut [WeeklyStanding]) {
    rows.sort_by(|a, b| {
        b.total_points
            .cmp(&a.total_points)
            .then(b.wins.cmp(&a.wins))
            .then(a.user_id.cmp(&b.user_id))
    });

    let mut previous_total: Option<i32> = None;
    let mut rank = 1;
    for (index, row) in rows.iter_mut().enumerate() {
        if previous_total != Some(row.total_points) {
            rank = index as u32 + 1;
            previous_total = Some(row.total_points);
        }
        row.rank = rank;
    }
}
