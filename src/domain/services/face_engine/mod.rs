//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This module defines the boundary to the external face-recognition engine: the four
// operations it exposes and the errors a call can produce.
//--------------------------------------------------------------------------------------------------

/// +----------------------------------------------------------+
/// | MODULES                                                  |
/// +----------+-------+-------+------------------------------+
/// | Exports:                                                 |
/// |   - FaceEngine (trait)                                   |
/// |   - EngineError (enum)                                   |
/// |   - MockFaceEngine (for tests)                           |
/// +----------------------------------------------------------+

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::models::types::{AnalyzeParams, FindParams, RepresentParams, ResultTable, VerifyParams};

/// Face-recognition engine reached by the request handlers.
///
/// Every operation is a single call whose output schema is owned by the engine.
/// Implementations must be thread-safe so a host can share one instance.
#[async_trait]
pub trait FaceEngine: Send + Sync {
    /// Extracts one embedding object per detected face.
    ///
    /// # Returns
    /// * `Ok(Value)` - The engine's collection of embedding objects
    /// * `Err(EngineError)` - If the engine call failed
    async fn represent(&self, params: RepresentParams) -> Result<Value, EngineError>;

    /// Decides whether two images show the same person.
    ///
    /// # Returns
    /// * `Ok(Value)` - The engine's verification mapping
    /// * `Err(EngineError)` - If the engine call failed
    async fn verify(&self, params: VerifyParams) -> Result<Value, EngineError>;

    /// Searches a reference database for faces matching the query image.
    ///
    /// # Returns
    /// * `Ok(Vec<ResultTable>)` - One result table per model
    /// * `Err(EngineError)` - If the engine call failed
    async fn find(&self, params: FindParams) -> Result<Vec<ResultTable>, EngineError>;

    /// Runs the requested demographic analyses.
    ///
    /// # Returns
    /// * `Ok(Value)` - The engine's collection of per-face demographies
    /// * `Err(EngineError)` - If the engine call failed
    async fn analyze(&self, params: AnalyzeParams) -> Result<Value, EngineError>;
}

/// Errors that can occur while calling the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine could not be reached.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The engine rejected or failed the operation.
    #[error("Engine failed {operation}: {message}")]
    Engine {
        operation: &'static str,
        message: String,
    },

    /// The engine answered with a payload of the wrong shape.
    #[error("Invalid engine response: {0}")]
    InvalidResponse(String),

    /// A search produced no result table at all.
    #[error("Engine returned no result tables")]
    NoResults,
}

impl EngineError {
    /// Shorthand for an engine-reported failure.
    pub fn engine(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Engine {
            operation,
            message: message.into(),
        }
    }
}

#[cfg(test)]
use mockall::*;

#[cfg(test)]
mock! {
    pub FaceEngine {}

    #[async_trait]
    impl FaceEngine for FaceEngine {
        async fn represent(&self, params: RepresentParams) -> Result<Value, EngineError>;

        async fn verify(&self, params: VerifyParams) -> Result<Value, EngineError>;

        async fn find(&self, params: FindParams) -> Result<Vec<ResultTable>, EngineError>;

        async fn analyze(&self, params: AnalyzeParams) -> Result<Value, EngineError>;
    }
}
