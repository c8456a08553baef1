use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::models::types::RepresentParams;
use crate::domain::services::face_engine::FaceEngine;
use crate::inbounds::api_error::ApiError;
use crate::inbounds::response::HandlerResponse;

/// +----------------------------------------------------------+
/// | STRUCTS | TRAITS | ENUMS | FUNCTIONS                     |
/// +----------+-------+-------+------------------------------+
/// | Functions:                                               |
/// |   - handle_represent                                     |
/// +----------------------------------------------------------+

/// Extracts face embeddings for one image.
///
/// # Arguments
///
/// * `params` - Image path and model/detector configuration
/// * `engine` - The face-recognition engine
///
/// # Flow
///
/// 1. Forwards the parameters to the engine's represent operation
/// 2. Wraps the returned collection under a `results` key
///
/// # Error Handling
///
/// * Engine errors become an `error` payload with status 400
pub async fn handle_represent(
    params: RepresentParams,
    engine: Arc<dyn FaceEngine>,
) -> HandlerResponse {
    info!("Representing image: {}", params.img_path);
    debug!("Represent params: {:?}", params);

    match engine.represent(params).await {
        Ok(embeddings) => HandlerResponse::results(embeddings),
        Err(e) => ApiError::engine("representing", e).into(),
    }
}
