mod feed;
mod game;
mod grading;
mod pick;
mod scoring;
mod shared;
mod standings;
mod stats;

use axum::{
    routing::{get, post},
    Router,
};
use feed::HttpFeedClient;
use game::repository::InMemoryGameRepository;
use grading::repository::InMemoryProcessingEventRepository;
// use grading::repository::PostgresProcessingEventRepository; // For production
use pick::repository::InMemoryPickRepository;
use scoring::repository::{InMemoryLeagueDirectory, InMemoryScoringRulesRepository};
use shared::AppState;
use stats::repository::InMemorySeasonStatsRepository;
// use stats::repository::PostgresSeasonStatsRepository; // For production
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pickem=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting pick'em grading server");

    // Create shared application state with dependency injection
    // Easy to switch between implementations:
    let games = Arc::new(InMemoryGameRepository::new());
    let picks = Arc::new(InMemoryPickRepository::new());
    let events = Arc::new(InMemoryProcessingEventRepository::new());
    let scoring_rules = Arc::new(InMemoryScoringRulesRepository::new());
    let season_stats = Arc::new(InMemorySeasonStatsRepository::new());
    let leagues = Arc::new(InMemoryLeagueDirectory::new());

    // For production with PostgreSQL:
    // let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    // let pool = sqlx::PgPool::connect(&database_url).await.expect("Failed to connect to database");
    // let events = Arc::new(PostgresProcessingEventRepository::new(pool.clone()));
    // let season_stats = Arc::new(PostgresSeasonStatsRepository::new(pool));

    let feed = Arc::new(HttpFeedClient::default());

    let app_state = AppState::new(
        games,
        picks,
        events,
        scoring_rules,
        season_stats,
        leagues,
        feed,
    );

    let app = Router::new()
        .route("/", get(|| async { "pick'em grading service" }))
        .route("/grading/run/:week", post(grading::handlers::run_grading))
        .route(
            "/standings/:season_id/:week",
            get(standings::handlers::get_weekly_standings),
        )
        .route(
            "/stats/:season_id/:user_id",
            get(stats::handlers::get_season_stats),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // run our app with hyper, listening globally on port 3000
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    info!("Server running on http://localhost:3000");
    axum::serve(listener, app).await.unwrap();
}
