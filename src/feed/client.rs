use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::errors::FeedError;
use super::models::{FeedGame, FeedGameStatus, FeedSide, FeedState};

const DEFAULT_SCOREBOARD_URL: &str =
    "https://site.api.espn.com/apis/site/v2/sports/football/nfl/scoreboard";

pub const FIRST_WEEK: u8 = 1;
pub const LAST_WEEK: u8 = 18;

/// Pause between sequential week fetches in a season sweep; the external
/// service has no documented quota but throttles bursts.
const SEASON_FETCH_DELAY: Duration = Duration::from_secs(1);

/// Read-only weekly scoreboard source
#[async_trait]
pub trait ScoreboardFeed: Send + Sync {
    async fn fetch_week(&self, week: u8) -> Result<Vec<FeedGame>, FeedError>;

    /// Best-effort full-season sweep: each week fetched sequentially with a
    /// fixed delay, failed weeks logged and skipped.
    async fn fetch_season(&self) -> Vec<FeedGame> {
        let mut games = Vec::new();
        for week in FIRST_WEEK..=LAST_WEEK {
            match self.fetch_week(week).await {
                Ok(mut week_games) => games.append(&mut week_games),
                Err(err) => {
                    warn!(week, error = %err, "Season sweep skipping failed week");
                }
            }
            if week < LAST_WEEK {
                tokio::time::sleep(SEASON_FETCH_DELAY).await;
            }
        }
        games
    }
}

/// Scoreboard client for the ESPN-style public API
pub struct HttpFeedClient {
    http: reqwest::Client,
    scoreboard_url: String,
}

impl Default for HttpFeedClient {
    fn default() -> Self {
        Self::new(DEFAULT_SCOREBOARD_URL)
    }
}

impl HttpFeedClient {
    pub fn new(scoreboard_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            scoreboard_url: scoreboard_url.into(),
        }
    }
}

#[async_trait]
impl ScoreboardFeed for HttpFeedClient {
    #[instrument(skip(self))]
    async fn fetch_week(&self, week: u8) -> Result<Vec<FeedGame>, FeedError> {
        if !(FIRST_WEEK..=LAST_WEEK).contains(&week) {
            return Err(FeedError::InvalidWeek(week));
        }

        let response = self
            .http
            .get(&self.scoreboard_url)
            .query(&[("week", week.to_string())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(week, status = status.as_u16(), "Scoreboard fetch failed");
            return Err(FeedError::Status(status.as_u16()));
        }

        let scoreboard: EspnScoreboard = response.json().await?;
        let games = normalize(scoreboard);
        debug!(week, count = games.len(), "Scoreboard fetched");
        Ok(games)
    }
}

// External response shapes. Everything optional-with-default because the
// feed omits fields freely for future and in-progress games.

#[derive(Debug, Deserialize)]
pub(crate) struct EspnScoreboard {
    #[serde(default)]
    events: Vec<EspnEvent>,
}

#[derive(Debug, Deserialize)]
struct EspnEvent {
    id: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    competitions: Vec<EspnCompetition>,
}

#[derive(Debug, Deserialize)]
struct EspnCompetition {
    #[serde(default)]
    competitors: Vec<EspnCompetitor>,
    #[serde(default)]
    status: Option<EspnStatus>,
}

#[derive(Debug, Deserialize)]
struct EspnCompetitor {
    #[serde(rename = "homeAway", default)]
    home_away: String,
    #[serde(default)]
    team: Option<EspnTeam>,
    #[serde(default)]
    score: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EspnTeam {
    #[serde(default)]
    abbreviation: String,
}

#[derive(Debug, Deserialize)]
struct EspnStatus {
    #[serde(rename = "type", default)]
    status_type: Option<EspnStatusType>,
}

#[derive(Debug, Deserialize)]
struct EspnStatusType {
    #[serde(default)]
    name: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    completed: bool,
}

/// Converts a raw scoreboard into canonical games, dropping entries that
/// are missing a side or an unparseable kickoff time.
pub(crate) fn normalize(scoreboard: EspnScoreboard) -> Vec<FeedGame> {
    let mut games = Vec::new();
    for event in scoreboard.events {
        match normalize_event(event) {
            Some(game) => games.push(game),
            None => debug!("Dropped malformed scoreboard event"),
        }
    }
    games
}

fn normalize_event(event: EspnEvent) -> Option<FeedGame> {
    let competition = event.competitions.into_iter().next()?;

    let mut home = None;
    let mut away = None;
    for competitor in competition.competitors {
        let side = FeedSide {
            abbreviation: competitor.team.map(|t| t.abbreviation).unwrap_or_default(),
            score: competitor.score.as_deref().and_then(parse_score),
        };
        match competitor.home_away.as_str() {
            "home" => home = Some(side),
            "away" => away = Some(side),
            other => warn!(event_id = %event.id, side = other, "Unknown competitor side"),
        }
    }

    let start_time = parse_event_date(&event.date).or_else(|| {
        warn!(event_id = %event.id, date = %event.date, "Unparseable event date");
        None
    })?;

    let status = competition
        .status
        .and_then(|s| s.status_type)
        .map(|t| FeedGameStatus {
            completed: t.completed,
            state: FeedState::from_str(&t.state).unwrap_or(FeedState::Pre),
            name: t.name,
        })
        .unwrap_or(FeedGameStatus {
            name: String::new(),
            state: FeedState::Pre,
            completed: false,
        });

    Some(FeedGame {
        external_id: event.id,
        start_time,
        home: home?,
        away: away?,
        status,
    })
}

fn parse_score(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

/// The feed emits RFC 3339 timestamps, sometimes without seconds
fn parse_event_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%MZ")
        .ok()
        .map(|naive| naive.and_utc())
}
