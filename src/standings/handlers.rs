use axum::{
    extract::{Path, State},
    Json,
};
use tracing::instrument;
use uuid::Uuid;

use super::models::WeeklyStanding;
use super::service::WeeklyStandingsRanker;
use crate::shared::{AppError, AppState};

/// HTTP handler for the week's leaderboard
///
/// GET /standings/:season_id/:week
#[instrument(name = "get_weekly_standings", skip(state))]
pub async fn get_weekly_standings(
    State(state): State<AppState>,
    Path((season_id, week)): Path<(Uuid, u8)>,
) -> Result<Json<Vec<WeeklyStanding>>, AppError> {
    let ranker = WeeklyStandingsRanker::from_state(&state);
    let standings = ranker.standings(season_id, week).await?;
    Ok(Json(standings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pick::{Pick, PickResult, Selection, Side};
    use crate::shared::test_utils::AppStateBuilder;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use tower::ServiceExt; // for `oneshot`

    fn app(state: crate::shared::AppState) -> Router {
        Router::new()
            .route(
                "/standings/:season_id/:week",
                axum::routing::get(get_weekly_standings),
            )
            .with_state(state)
    }

    #[tokio::test]
    async fn returns_ranked_rows_for_the_week() {
        let state = AppStateBuilder::new().build();
        let season = Uuid::new_v4();
        let user = Uuid::new_v4();

        let pick = Pick::new(
            user,
            Uuid::new_v4(),
            season,
            3,
            Selection::Moneyline { side: Side::Home },
        );
        state.picks.create_pick(&pick).await.unwrap();
        state
            .picks
            .record_result(pick.id, PickResult::Win, 1)
            .await
            .unwrap();

        let response = app(state)
            .oneshot(
                Request::builder()
                    .uri(format!("/standings/{}/3", season))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let rows: Vec<WeeklyStanding> = serde_json::from_slice(&body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].user_id, user);
        assert_eq!(rows[0].rank, 1);
    }

    #[tokio::test]
    async fn empty_week_returns_empty_list() {
        let state = AppStateBuilder::new().build();
        let response = app(state)
            .oneshot(
                Request::builder()
                    .uri(format!("/standings/{}/1", Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let rows: Vec<WeeklyStanding> = serde_json::from_slice(&body).unwrap();
        assert!(rows.is_empty());
    }
}
