pub mod api;
pub mod api_worker;
pub mod app;
pub mod config;
pub mod input;
pub mod logger;
pub mod models;
pub mod ui;
pub mod utils;
pub mod views;

// Re-exports for convenience
pub use api::{ApiError, StudyApi, StudyApiClient};
pub use api_worker::spawn_api_worker;
pub use app::App;
pub use config::{Config, ConfigError};
pub use models::{ApiRequest, ApiResponse, Flashcard, QuizQuestion, View};
pub use ui::draw;
