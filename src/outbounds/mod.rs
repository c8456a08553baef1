//! Adapters to systems outside the service.

/// HTTP adapter for the face-recognition engine.
pub mod http_engine;

pub use http_engine::HttpFaceEngine;
