use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::ProcessingEvent;
use crate::shared::AppError;

/// Outcome of an event insert against the uniqueness gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventInsert {
    Inserted,
    /// Another attempt (possibly a concurrent run) already recorded this
    /// external id
    AlreadyRecorded,
}

/// Trait for processing-event storage. Implementations MUST enforce
/// uniqueness on `external_id`: no external game id may ever be associated
/// with more than one committed event.
#[async_trait]
pub trait ProcessingEventRepository: Send + Sync {
    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<ProcessingEvent>, AppError>;

    async fn insert_event(&self, event: &ProcessingEvent) -> Result<EventInsert, AppError>;

    async fn list_events(&self) -> Result<Vec<ProcessingEvent>, AppError>;
}

/// In-memory implementation of ProcessingEventRepository for development
/// and testing. Keyed by external id, which makes the uniqueness gate a
/// plain map-entry check.
pub struct InMemoryProcessingEventRepository {
    events: Mutex<HashMap<String, ProcessingEvent>>,
}

impl Default for InMemoryProcessingEventRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryProcessingEventRepository {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl ProcessingEventRepository for InMemoryProcessingEventRepository {
    #[instrument(skip(self))]
    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<ProcessingEvent>, AppError> {
        let events = self.events.lock().unwrap();
        Ok(events.get(external_id).cloned())
    }

    #[instrument(skip(self, event))]
    async fn insert_event(&self, event: &ProcessingEvent) -> Result<EventInsert, AppError> {
        let mut events = self.events.lock().unwrap();
        if events.contains_key(&event.external_id) {
            warn!(external_id = %event.external_id, "Processing event already recorded");
            return Ok(EventInsert::AlreadyRecorded);
        }
        events.insert(event.external_id.clone(), event.clone());
        debug!(external_id = %event.external_id, "Processing event recorded");
        Ok(EventInsert::Inserted)
    }

    #[instrument(skip(self))]
    async fn list_events(&self) -> Result<Vec<ProcessingEvent>, AppError> {
        let events = self.events.lock().unwrap();
        Ok(events.values().cloned().collect())
    }
}

/// PostgreSQL implementation of the processing-event store. The
/// `processing_events.external_id` unique index is what guarantees
/// idempotency across overlapping pipeline runs.
pub struct PostgresProcessingEventRepository {
    pool: PgPool,
}

impl PostgresProcessingEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProcessingEventRepository for PostgresProcessingEventRepository {
    #[instrument(skip(self))]
    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<ProcessingEvent>, AppError> {
        let row = sqlx::query(
            "SELECT id, external_id, game_id, previous_status, new_status, home_score, \
             away_score, picks_processed, points_awarded, error, processed_at \
             FROM processing_events WHERE external_id = $1",
        )
        .bind(external_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, external_id, "Failed to fetch processing event");
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(event_from_row))
    }

    #[instrument(skip(self, event))]
    async fn insert_event(&self, event: &ProcessingEvent) -> Result<EventInsert, AppError> {
        let result = sqlx::query(
            "INSERT INTO processing_events \
             (id, external_id, game_id, previous_status, new_status, home_score, away_score, \
              picks_processed, points_awarded, error, processed_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             ON CONFLICT (external_id) DO NOTHING",
        )
        .bind(event.id)
        .bind(&event.external_id)
        .bind(event.game_id)
        .bind(event.previous_status.map(|s| s.to_string()))
        .bind(event.new_status.map(|s| s.to_string()))
        .bind(event.home_score)
        .bind(event.away_score)
        .bind(event.picks_processed as i32)
        .bind(event.points_awarded)
        .bind(&event.error)
        .bind(event.processed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, external_id = %event.external_id, "Failed to insert processing event");
            AppError::DatabaseError(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            warn!(external_id = %event.external_id, "Processing event already recorded");
            Ok(EventInsert::AlreadyRecorded)
        } else {
            debug!(external_id = %event.external_id, "Processing event recorded");
            Ok(EventInsert::Inserted)
        }
    }

    #[instrument(skip(self))]
    async fn list_events(&self) -> Result<Vec<ProcessingEvent>, AppError> {
        let rows = sqlx::query(
            "SELECT id, external_id, game_id, previous_status, new_status, home_score, \
             away_score, picks_processed, points_awarded, error, processed_at \
             FROM processing_events ORDER BY processed_at",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to list processing events");
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(event_from_row).collect())
    }
}

fn event_from_row(row: sqlx::postgres::PgRow) -> ProcessingEvent {
    use sqlx::Row;
    use std::str::FromStr;

    let previous: Option<String> = row.get("previous_status");
    let new: Option<String> = row.get("new_status");
    let picks: i32 = row.get("picks_processed");
    ProcessingEvent {
        id: row.get("id"),
        external_id: row.get("external_id"),
        game_id: row.get("game_id"),
        previous_status: previous.and_then(|s| crate::game::GameStatus::from_str(&s).ok()),
        new_status: new.and_then(|s| crate::game::GameStatus::from_str(&s).ok()),
        home_score: row.get("home_score"),
        away_score: row.get("away_score"),
        picks_processed: picks as u32,
        points_awarded: row.get("points_awarded"),
        error: row.get("error"),
        processed_at: row.get("processed_at"),
    }
}
