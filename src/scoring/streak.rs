use chrono::{DateTime, Utc};

use crate::pick::{Pick, PickResult};

/// Signed run lengths over a user's chronological graded picks.
/// `current` is the live run (positive wins, negative losses); `best` and
/// `worst` are the extremes observed across the whole history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreakSummary {
    pub current: i32,
    pub best: i32,
    pub worst: i32,
}

/// Walks graded results in time order. A win starts or extends a positive
/// run, a loss starts or extends a negative run, a push changes nothing.
pub fn streaks(results: &[(DateTime<Utc>, PickResult)]) -> StreakSummary {
    let mut ordered: Vec<&(DateTime<Utc>, PickResult)> = results.iter().collect();
    ordered.sort_by_key(|(at, _)| *at);

    let mut summary = StreakSummary::default();
    for (_, result) in ordered {
        match result {
            PickResult::Win => {
                summary.current = if summary.current <= 0 {
                    1
                } else {
                    summary.current + 1
                };
            }
            PickResult::Loss => {
                summary.current = if summary.current >= 0 {
                    -1
                } else {
                    summary.current - 1
                };
            }
            PickResult::Push | PickResult::Pending => {}
        }
        summary.best = summary.best.max(summary.current);
        summary.worst = summary.worst.min(summary.current);
    }
    summary
}

pub fn streaks_from_picks(picks: &[Pick]) -> StreakSummary {
    let results: Vec<(DateTime<Utc>, PickResult)> =
        picks.iter().map(|p| (p.created_at, p.result)).collect();
    streaks(&results)
}

/// Streak bonus: `streak_bonus` per completed three-win increment,
/// positive streaks only.
pub fn streak_bonus(bonus_per_increment: i32, streak: i32) -> i32 {
    if streak >= 3 {
        bonus_per_increment * (streak / 3)
    } else {
        0
    }
}
