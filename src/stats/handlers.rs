use axum::{
    extract::{Path, State},
    Json,
};
use tracing::instrument;
use uuid::Uuid;

use super::models::SeasonStats;
use crate::shared::{AppError, AppState};

/// HTTP handler for reading a user's cached season aggregate
///
/// GET /stats/:season_id/:user_id
#[instrument(name = "get_season_stats", skip(state))]
pub async fn get_season_stats(
    State(state): State<AppState>,
    Path((season_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<SeasonStats>, AppError> {
    let stats = state
        .season_stats
        .get_stats(user_id, season_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "no season stats for user {} in season {}",
                user_id, season_id
            ))
        })?;

    Ok(Json(stats))
}
