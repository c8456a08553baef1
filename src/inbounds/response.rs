use serde::Serialize;
use serde_json::{Value, json};
use tracing::error;

use super::api_error::ApiError;

/// +----------------------------------------------------------+
/// | STRUCTS | TRAITS | ENUMS | FUNCTIONS                     |
/// +----------+-------+-------+------------------------------+
/// | Structs:                                                 |
/// |   - HandlerResponse                                      |
/// | Implementations:                                         |
/// |   - From<ApiError> for HandlerResponse                   |
/// +----------------------------------------------------------+

/// Status paired with every successful payload.
pub const OK: u16 = 200;

/// Transport-ready outcome of a handler: a JSON body and an HTTP-like status.
///
/// The body is either the success payload or an object holding a single `error` key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandlerResponse {
    pub status: u16,
    pub body: Value,
}

impl HandlerResponse {
    /// Success payload returned as-is.
    pub fn ok(body: Value) -> Self {
        Self { status: OK, body }
    }

    /// Success payload wrapped under a `results` key.
    pub fn results(results: Value) -> Self {
        Self::ok(json!({ "results": results }))
    }

    /// Whether this is an error payload.
    pub fn is_error(&self) -> bool {
        self.body.get("error").is_some() && self.status != OK
    }

    /// The error message, for error payloads.
    pub fn error_message(&self) -> Option<&str> {
        if self.status == OK {
            return None;
        }
        self.body.get("error").and_then(Value::as_str)
    }
}

impl From<ApiError> for HandlerResponse {
    fn from(err: ApiError) -> Self {
        error!("{}", err);
        Self {
            status: err.status(),
            body: json!({ "error": err.message() }),
        }
    }
}
