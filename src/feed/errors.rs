use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("week {0} is outside the 1-18 schedule")]
    InvalidWeek(u8),

    #[error("feed request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed returned status {0}")]
    Status(u16),
}
