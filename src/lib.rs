// Expose the modules
pub mod config;
pub mod domain;
pub mod inbounds;
pub mod outbounds;

// Re-export key types for easier usage
pub use config::{Config, ConfigError};
pub use domain::models::types::{
    Action, AnalyzeParams, FindParams, RepresentParams, ResultTable, VerifyParams,
};
pub use domain::services::face_engine::{EngineError, FaceEngine};
pub use inbounds::api_error::ApiError;
pub use inbounds::dtos::FaceRequest;
pub use inbounds::handlers::{
    extract_matches, handle_analyze, handle_find, handle_represent, handle_request, handle_verify,
};
pub use inbounds::response::HandlerResponse;
pub use outbounds::HttpFaceEngine;
