pub mod client;
pub mod error;
pub mod types;

// Public API exports
pub use client::{StudyApi, StudyApiClient};
pub use error::{parse_error_detail, ApiError};
pub use types::{HealthResponse, UploadResponse};
