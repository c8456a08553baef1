use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::models::types::VerifyParams;
use crate::domain::services::face_engine::FaceEngine;
use crate::inbounds::api_error::ApiError;
use crate::inbounds::response::HandlerResponse;

/// +----------------------------------------------------------+
/// | STRUCTS | TRAITS | ENUMS | FUNCTIONS                     |
/// +----------+-------+-------+------------------------------+
/// | Functions:                                               |
/// |   - handle_verify                                        |
/// +----------------------------------------------------------+

/// Verifies whether two images show the same person.
///
/// The engine's verification mapping is returned unmodified.
pub async fn handle_verify(params: VerifyParams, engine: Arc<dyn FaceEngine>) -> HandlerResponse {
    info!("Verifying {} against {}", params.img1_path, params.img2_path);
    debug!("Verify params: {:?}", params);

    match engine.verify(params).await {
        Ok(verification) => HandlerResponse::ok(verification),
        Err(e) => ApiError::engine("verifying", e).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::face_engine::{EngineError, MockFaceEngine};
    use serde_json::json;

    #[tokio::test]
    async fn should_return_engine_mapping_unmodified() {
        let verification = json!({
            "verified": true,
            "distance": 0.21,
            "threshold": 0.68,
            "model": "VGG-Face",
            "detector_backend": "opencv",
            "similarity_metric": "cosine"
        });
        let expected = verification.clone();

        let mut engine = MockFaceEngine::new();
        engine
            .expect_verify()
            .withf(|p| p.img1_path == "a.jpg" && p.img2_path == "b.jpg" && p.distance_metric == "cosine")
            .times(1)
            .returning(move |_| Ok(verification.clone()));

        let response = handle_verify(VerifyParams::new("a.jpg", "b.jpg"), Arc::new(engine)).await;

        assert_eq!(response, HandlerResponse::ok(expected));
    }

    #[tokio::test]
    async fn should_report_failure_with_engine_text() {
        let mut engine = MockFaceEngine::new();
        engine
            .expect_verify()
            .returning(|_| Err(EngineError::InvalidResponse("expected object".into())));

        let response = handle_verify(VerifyParams::new("a.jpg", "b.jpg"), Arc::new(engine)).await;

        assert!(response.is_error());
        assert!(response.error_message().unwrap().contains("expected object"));
    }
}
