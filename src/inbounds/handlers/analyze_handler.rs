use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::models::types::AnalyzeParams;
use crate::domain::services::face_engine::FaceEngine;
use crate::inbounds::api_error::ApiError;
use crate::inbounds::response::HandlerResponse;

/// +----------------------------------------------------------+
/// | STRUCTS | TRAITS | ENUMS | FUNCTIONS                     |
/// +----------+-------+-------+------------------------------+
/// | Functions:                                               |
/// |   - handle_analyze                                       |
/// +----------------------------------------------------------+

/// Runs the requested demographic analyses on one image.
///
/// # Flow
///
/// 1. Forwards the image path and actions to the engine's analyze operation
/// 2. Wraps the returned demographies under a `results` key
///
/// # Error Handling
///
/// * Engine errors become an `error` payload with status 400
pub async fn handle_analyze(params: AnalyzeParams, engine: Arc<dyn FaceEngine>) -> HandlerResponse {
    info!("Analyzing image: {} ({:?})", params.img_path, params.actions);
    debug!("Analyze params: {:?}", params);

    match engine.analyze(params).await {
        Ok(demographies) => HandlerResponse::results(demographies),
        Err(e) => ApiError::engine("analyzing", e).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::types::Action;
    use crate::domain::services::face_engine::{EngineError, MockFaceEngine};
    use serde_json::json;

    #[tokio::test]
    async fn should_forward_actions_and_wrap_results() {
        let mut engine = MockFaceEngine::new();
        engine
            .expect_analyze()
            .withf(|p| p.actions == vec![Action::Age, Action::Gender])
            .times(1)
            .returning(|_| Ok(json!([{ "age": 31, "dominant_gender": "Woman" }])));

        let mut params = AnalyzeParams::new("portrait.png");
        params.actions = vec![Action::Age, Action::Gender];

        let response = handle_analyze(params, Arc::new(engine)).await;

        assert_eq!(response.status, 200);
        assert_eq!(response.body["results"], json!([{ "age": 31, "dominant_gender": "Woman" }]));
    }

    #[tokio::test]
    async fn should_report_failure() {
        let mut engine = MockFaceEngine::new();
        engine
            .expect_analyze()
            .returning(|_| Err(EngineError::engine("analyze", "Spoof detected in the given image")));

        let response = handle_analyze(AnalyzeParams::new("portrait.png"), Arc::new(engine)).await;

        assert_eq!(response.status, 400);
        let message = response.error_message().unwrap();
        assert!(message.starts_with("Exception while analyzing: "));
        assert!(message.contains("Spoof detected in the given image"));
    }
}
