pub mod detector;
pub mod engine;
mod errors;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use detector::{CompletionDetector, Detection};
pub use engine::PickGrade;
pub use errors::GradingError;
pub use models::{GradingRunSummary, ProcessingEvent};
pub use repository::{
    EventInsert, InMemoryProcessingEventRepository, PostgresProcessingEventRepository,
    ProcessingEventRepository,
};
pub use service::GradingService;
