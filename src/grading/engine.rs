//! Pure pick-grading logic. No I/O and no shared state: the same
//! selection and final score always produce the same result, which is
//! what makes re-grading safe.

use crate::pick::{PickResult, Selection, Side, TotalDirection};
use crate::scoring::ScoringRules;

#[derive(Debug, Clone, PartialEq)]
pub struct PickGrade {
    pub result: PickResult,
    pub points: i32,
    pub explanation: String,
}

/// Grades one selection against a final score, mapping the outcome to
/// points through the league's rules.
pub fn grade(
    selection: &Selection,
    home_score: i32,
    away_score: i32,
    rules: &ScoringRules,
) -> PickGrade {
    let (result, explanation) = resolve(selection, home_score, away_score);
    PickGrade {
        result,
        points: rules.points_for(result),
        explanation,
    }
}

fn resolve(selection: &Selection, home: i32, away: i32) -> (PickResult, String) {
    match selection {
        Selection::Moneyline { side } => {
            if home == away {
                return (
                    PickResult::Push,
                    format!("moneyline push: game tied {}-{}", home, away),
                );
            }
            let winner = if home > away { Side::Home } else { Side::Away };
            if *side == winner {
                (
                    PickResult::Win,
                    format!("{} won {}-{}", side, home.max(away), home.min(away)),
                )
            } else {
                (
                    PickResult::Loss,
                    format!("{} lost {}-{}", side, home.min(away), home.max(away)),
                )
            }
        }
        Selection::Spread { side, line } => {
            let (picked, opponent) = match side {
                Side::Home => (home, away),
                Side::Away => (away, home),
            };
            let adjusted = picked as f64 + line;
            let opponent = opponent as f64;
            if (adjusted - opponent).abs() < f64::EPSILON {
                (
                    PickResult::Push,
                    format!("spread push: {} {:+} lands exactly on {}", side, line, opponent),
                )
            } else if adjusted > opponent {
                (
                    PickResult::Win,
                    format!("{} {:+} covered: adjusted {} vs {}", side, line, adjusted, opponent),
                )
            } else {
                (
                    PickResult::Loss,
                    format!(
                        "{} {:+} did not cover: adjusted {} vs {}",
                        side, line, adjusted, opponent
                    ),
                )
            }
        }
        Selection::Total { direction, line } => {
            let total = (home + away) as f64;
            if (total - *line).abs() < f64::EPSILON {
                return (
                    PickResult::Push,
                    format!("total push: {} points lands exactly on the line", total),
                );
            }
            let covered = match direction {
                TotalDirection::Over => total > *line,
                TotalDirection::Under => total < *line,
            };
            let explanation = format!("total {} vs {} {}", total, direction, line);
            if covered {
                (PickResult::Win, explanation)
            } else {
                (PickResult::Loss, explanation)
            }
        }
    }
}
