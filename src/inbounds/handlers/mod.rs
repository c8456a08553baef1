/// +----------------------------------------------------------+
/// | MODULES                                                  |
/// +----------+-------+-------+------------------------------+
/// | Exports:                                                 |
/// |   - analyze_handler                                      |
/// |   - find_handler                                         |
/// |   - represent_handler                                    |
/// |   - verify_handler                                       |
/// | Functions:                                               |
/// |   - handle_request                                       |
/// +----------------------------------------------------------+

use std::sync::Arc;
use tracing::info;

use crate::domain::services::face_engine::FaceEngine;
use crate::inbounds::api_error::ApiError;
use crate::inbounds::dtos::FaceRequest;
use crate::inbounds::response::HandlerResponse;

/// Handler for demographic analysis requests
pub mod analyze_handler;

/// Handler for database search requests
pub mod find_handler;

/// Handler for embedding extraction requests
pub mod represent_handler;

/// Handler for pairwise verification requests
pub mod verify_handler;

pub use analyze_handler::handle_analyze;
pub use find_handler::{extract_matches, handle_find};
pub use represent_handler::handle_represent;
pub use verify_handler::handle_verify;

/// Processes a raw JSON request and routes it by its `request_type`.
///
/// # Error Handling
///
/// * Deserialization errors are converted to `ApiError::BadRequest`
/// * Engine errors are handled by the routed handler
pub async fn handle_request(request: &[u8], engine: Arc<dyn FaceEngine>) -> HandlerResponse {
    let face_request: FaceRequest = match serde_json::from_slice(request) {
        Ok(face_request) => face_request,
        Err(e) => return ApiError::BadRequest(format!("Invalid face request: {}", e)).into(),
    };

    info!("Received {} request", face_request.operation());

    match face_request {
        FaceRequest::Represent(params) => handle_represent(params, engine).await,
        FaceRequest::Verify(params) => handle_verify(params, engine).await,
        FaceRequest::Find(params) => handle_find(params, engine).await,
        FaceRequest::Analyze(params) => handle_analyze(params, engine).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::face_engine::MockFaceEngine;
    use serde_json::json;

    #[tokio::test]
    async fn should_route_by_request_type() {
        let mut engine = MockFaceEngine::new();
        engine
            .expect_represent()
            .withf(|p| p.img_path == "a.jpg" && !p.align)
            .times(1)
            .returning(|_| Ok(json!([])));

        let payload = json!({ "request_type": "represent", "img_path": "a.jpg", "align": false });
        let response = handle_request(payload.to_string().as_bytes(), Arc::new(engine)).await;

        assert_eq!(response, HandlerResponse::results(json!([])));
    }

    #[tokio::test]
    async fn should_reject_malformed_payload_without_calling_engine() {
        let engine = MockFaceEngine::new();

        let response = handle_request(b"{\"request_type\": \"find\"}", Arc::new(engine)).await;

        assert_eq!(response.status, 400);
        assert!(response
            .error_message()
            .unwrap()
            .starts_with("Bad request: Invalid face request: "));
    }
}
