use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

use super::selection::{Selection, SelectionParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BetType {
    Moneyline,
    Spread,
    Total,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PickResult {
    Pending,
    Win,
    Loss,
    Push,
}

impl PickResult {
    pub fn is_graded(&self) -> bool {
        *self != PickResult::Pending
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pick {
    pub id: Uuid,
    pub user_id: Uuid,
    pub game_id: Uuid,
    pub season_id: Uuid,
    pub week: u8,
    pub bet_type: BetType,
    /// Structured selection for picks created through the current API
    pub selection: Option<Selection>,
    /// Legacy free-text selection, kept for records predating the
    /// structured representation
    pub selection_text: String,
    pub result: PickResult,
    pub points_awarded: i32,
    pub created_at: DateTime<Utc>,
}

impl Pick {
    /// New picks carry a structured selection; the text column holds its
    /// canonical rendering for older readers.
    pub fn new(
        user_id: Uuid,
        game_id: Uuid,
        season_id: Uuid,
        week: u8,
        selection: Selection,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            game_id,
            season_id,
            week,
            bet_type: selection.bet_type(),
            selection_text: selection.to_string(),
            selection: Some(selection),
            result: PickResult::Pending,
            points_awarded: 0,
            created_at: Utc::now(),
        }
    }

    /// Legacy pick carrying only free text, as migrated records do
    pub fn legacy(
        user_id: Uuid,
        game_id: Uuid,
        season_id: Uuid,
        week: u8,
        bet_type: BetType,
        selection_text: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            game_id,
            season_id,
            week,
            bet_type,
            selection: None,
            selection_text: selection_text.into(),
            result: PickResult::Pending,
            points_awarded: 0,
            created_at: Utc::now(),
        }
    }

    /// Resolves the selection to grade against: the structured value when
    /// present, otherwise the legacy text through the parsing shim.
    pub fn resolved_selection(&self) -> Result<Selection, SelectionParseError> {
        match &self.selection {
            Some(selection) => Ok(selection.clone()),
            None => Selection::parse(self.bet_type, &self.selection_text),
        }
    }
}
