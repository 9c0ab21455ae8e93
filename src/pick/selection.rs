use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumString};
use thiserror::Error;

use super::models::BetType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TotalDirection {
    Over,
    Under,
}

/// Structured bet selection. New picks are created with one of these;
/// the text parser below exists only to grade legacy free-text records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selection {
    Moneyline { side: Side },
    Spread { side: Side, line: f64 },
    Total { direction: TotalDirection, line: f64 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionParseError {
    #[error("empty selection")]
    Empty,
    #[error("unknown side '{0}', expected home/h/away/a")]
    UnknownSide(String),
    #[error("unknown direction '{0}', expected over/o/under/u")]
    UnknownDirection(String),
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("selection '{0}' does not match any known {1} pattern")]
    Malformed(String, BetType),
}

impl Selection {
    /// Migration shim: parses the legacy free-text selection for a bet type.
    ///
    /// Only the documented tokens are accepted; team-name selections are
    /// rejected rather than guessed at.
    pub fn parse(bet_type: BetType, text: &str) -> Result<Self, SelectionParseError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SelectionParseError::Empty);
        }

        match bet_type {
            BetType::Moneyline => {
                let side = parse_side(trimmed)?;
                Ok(Selection::Moneyline { side })
            }
            BetType::Spread => {
                let (first, second) = split_two(trimmed, bet_type)?;
                // "<side> <±N>" or "<±N> <side>"
                if let Ok(side) = parse_side(first) {
                    let line = parse_number(second)?;
                    Ok(Selection::Spread { side, line })
                } else if let Ok(side) = parse_side(second) {
                    let line = parse_number(first)?;
                    Ok(Selection::Spread { side, line })
                } else {
                    Err(SelectionParseError::UnknownSide(first.to_string()))
                }
            }
            BetType::Total => {
                let (first, second) = split_two(trimmed, bet_type)?;
                if let Ok(direction) = parse_direction(first) {
                    let line = parse_number(second)?;
                    Ok(Selection::Total { direction, line })
                } else if let Ok(direction) = parse_direction(second) {
                    let line = parse_number(first)?;
                    Ok(Selection::Total { direction, line })
                } else {
                    Err(SelectionParseError::UnknownDirection(first.to_string()))
                }
            }
        }
    }

    pub fn bet_type(&self) -> BetType {
        match self {
            Selection::Moneyline { .. } => BetType::Moneyline,
            Selection::Spread { .. } => BetType::Spread,
            Selection::Total { .. } => BetType::Total,
        }
    }
}

/// Canonical text rendering, accepted back by `Selection::parse`
impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Moneyline { side } => write!(f, "{}", side),
            Selection::Spread { side, line } => write!(f, "{} {:+}", side, line),
            Selection::Total { direction, line } => write!(f, "{} {}", direction, line),
        }
    }
}

fn parse_side(token: &str) -> Result<Side, SelectionParseError> {
    match token.to_ascii_lowercase().as_str() {
        "home" | "h" => Ok(Side::Home),
        "away" | "a" => Ok(Side::Away),
        other => Err(SelectionParseError::UnknownSide(other.to_string())),
    }
}

fn parse_direction(token: &str) -> Result<TotalDirection, SelectionParseError> {
    match token.to_ascii_lowercase().as_str() {
        "over" | "o" => Ok(TotalDirection::Over),
        "under" | "u" => Ok(TotalDirection::Under),
        other => Err(SelectionParseError::UnknownDirection(other.to_string())),
    }
}

fn parse_number(token: &str) -> Result<f64, SelectionParseError> {
    token
        .parse::<f64>()
        .map_err(|_| SelectionParseError::InvalidNumber(token.to_string()))
}

fn split_two(text: &str, bet_type: BetType) -> Result<(&str, &str), SelectionParseError> {
    let mut tokens = text.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(first), Some(second), None) => Ok((first, second)),
        _ => Err(SelectionParseError::Malformed(
            text.to_string(),
            bet_type,
        )),
    }
}
