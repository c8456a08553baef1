use std::sync::Arc;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::domain::models::types::{FindParams, ResultTable};
use crate::domain::services::face_engine::{EngineError, FaceEngine};
use crate::inbounds::api_error::ApiError;
use crate::inbounds::dtos::MATCH_FIELDS;
use crate::inbounds::response::HandlerResponse;

/// +----------------------------------------------------------+
/// | STRUCTS | TRAITS | ENUMS | FUNCTIONS                     |
/// +----------+-------+-------+------------------------------+
/// | Functions:                                               |
/// |   - handle_find                                          |
/// |   - extract_matches                                      |
/// +----------------------------------------------------------+

/// Searches a reference database for the query face.
///
/// # Arguments
///
/// * `params` - Query image, database path and model/detector configuration
/// * `engine` - The face-recognition engine
///
/// # Flow
///
/// 1. Forwards the parameters to the engine's find operation
/// 2. Takes the first per-model result table
/// 3. Flattens it into a list of `{identity, threshold, distance}` matches
///
/// # Error Handling
///
/// * Engine errors, including an empty table list, become an `error` payload with status 400
/// * Failures are prefixed `Exception while finding`; the upstream service reports them as
///   `Exception while verifying`
pub async fn handle_find(params: FindParams, engine: Arc<dyn FaceEngine>) -> HandlerResponse {
    info!("Searching {} for {}", params.db_path, params.img_path);
    debug!("Find params: {:?}", params);

    let tables = match engine.find(params).await {
        Ok(tables) => tables,
        Err(e) => return ApiError::engine("finding", e).into(),
    };

    match tables.first() {
        Some(table) => HandlerResponse::ok(Value::Array(extract_matches(table))),
        None => ApiError::engine("finding", EngineError::NoResults).into(),
    }
}

/// Copies the match fields of every complete row, preserving row order.
///
/// A row is skipped when its index is out of bounds for any match field; a
/// missing column has no rows.
pub fn extract_matches(table: &ResultTable) -> Vec<Value> {
    let total = table.len();
    let mut matches = Vec::with_capacity(total);

    for row in 0..total {
        let cells: Option<Map<String, Value>> = MATCH_FIELDS
            .iter()
            .map(|field| table.cell(field, row).map(|value| (field.to_string(), value.clone())))
            .collect();

        match cells {
            Some(fields) => matches.push(Value::Object(fields)),
            None => warn!("Skipping incomplete search row {}", row),
        }
    }

    matches
}
