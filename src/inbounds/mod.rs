/// +----------------------------------------------------------+
/// | MODULES                                                  |
/// +----------+-------+-------+------------------------------+
/// | Exports:                                                 |
/// |   - api_error                                            |
/// |   - dtos                                                 |
/// |   - handlers                                             |
/// |   - response                                             |
/// +----------------------------------------------------------+

/// Error types for the handler layer.
pub mod api_error;

/// Raw request payloads.
pub mod dtos;

/// Request handlers for the four engine operations.
pub mod handlers;

/// Transport-ready handler outcome.
pub mod response;
