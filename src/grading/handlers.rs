use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument};

use super::models::GradingRunSummary;
use super::service::GradingService;
use crate::shared::{AppError, AppState};

/// HTTP handler triggering a grading pass
///
/// POST /grading/run/:week
/// Idempotent: re-triggering a week re-grades nothing already processed.
/// Returns the run summary.
#[instrument(name = "run_grading", skip(state))]
pub async fn run_grading(
    State(state): State<AppState>,
    Path(week): Path<u8>,
) -> Result<Json<GradingRunSummary>, AppError> {
    info!(week, "Grading pass requested");

    let service = GradingService::from_state(&state);
    let summary = service.run_week(week).await?;

    info!(
        week,
        games_processed = summary.games_processed,
        picks_graded = summary.picks_graded,
        "Grading pass completed"
    );

    Ok(Json(summary))
}
