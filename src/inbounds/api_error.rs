use std::backtrace::Backtrace;
use thiserror::Error;

use crate::domain::services::face_engine::EngineError;

/// +----------------------------------------------------------+
/// | STRUCTS | TRAITS | ENUMS | FUNCTIONS                     |
/// +----------+-------+-------+------------------------------+
/// | Enums:                                                   |
/// |   - ApiError                                             |
/// | Constants:                                               |
/// |   - BAD_REQUEST                                          |
/// +----------------------------------------------------------+

/// Status paired with every error payload.
pub const BAD_REQUEST: u16 = 400;

/// Represents errors that can occur in the handler layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request payload was malformed or invalid.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The engine call raised while serving an operation.
    #[error("Exception while {activity}: {error}")]
    Engine {
        activity: &'static str,
        error: anyhow::Error,
        trace: String,
    },
}

impl ApiError {
    /// Wraps an engine failure and captures the current backtrace regardless of `RUST_BACKTRACE`.
    pub fn engine(activity: &'static str, err: EngineError) -> Self {
        ApiError::Engine {
            activity,
            error: anyhow::Error::new(err),
            trace: Backtrace::force_capture().to_string(),
        }
    }

    /// Status reported alongside the error payload.
    pub fn status(&self) -> u16 {
        BAD_REQUEST
    }

    /// Message placed under the `error` key.
    ///
    /// Engine failures carry the message followed by the cause chain and a stack backtrace.
    pub fn message(&self) -> String {
        match self {
            ApiError::BadRequest(_) => self.to_string(),
            ApiError::Engine { error, trace, .. } => {
                format!("{} - {:#}\n\nStack backtrace:\n{}", self, error, trace)
            }
        }
    }
}
