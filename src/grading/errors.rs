use thiserror::Error;

use crate::feed::FeedError;
use crate::shared::AppError;

#[derive(Debug, Error)]
pub enum GradingError {
    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error("no internal game matches external id {0}")]
    GameResolution(String),

    #[error("completed game {0} has no final score")]
    MissingScore(String),

    #[error(transparent)]
    Repository(#[from] AppError),
}

impl From<GradingError> for AppError {
    fn from(err: GradingError) -> Self {
        match err {
            GradingError::Feed(feed) => AppError::Feed(feed.to_string()),
            GradingError::Repository(app) => app,
            resolution @ GradingError::GameResolution(_) => {
                AppError::NotFound(resolution.to_string())
            }
            missing @ GradingError::MissingScore(_) => AppError::Validation(missing.to_string()),
        }
    }
}
