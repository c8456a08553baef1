use serde::{Deserialize, Serialize};

use crate::domain::models::types::{AnalyzeParams, FindParams, RepresentParams, VerifyParams};

/// +----------------------------------------------------------+
/// | STRUCTS | TRAITS | ENUMS | FUNCTIONS                     |
/// +----------+-------+-------+------------------------------+
/// | Enums:                                                   |
/// |   - FaceRequest                                          |
/// | Constants:                                               |
/// |   - MATCH_FIELDS                                         |
/// +----------------------------------------------------------+

/// A raw request, tagged by `request_type`, carrying one operation's parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "request_type", rename_all = "snake_case")]
pub enum FaceRequest {
    /// Embedding extraction.
    Represent(RepresentParams),

    /// Pairwise verification.
    Verify(VerifyParams),

    /// Database search.
    Find(FindParams),

    /// Demographic analysis.
    Analyze(AnalyzeParams),
}

impl FaceRequest {
    /// Operation name, as used in the `request_type` tag.
    pub fn operation(&self) -> &'static str {
        match self {
            FaceRequest::Represent(_) => "represent",
            FaceRequest::Verify(_) => "verify",
            FaceRequest::Find(_) => "find",
            FaceRequest::Analyze(_) => "analyze",
        }
    }
}

/// Result table columns copied into each search match, in output order.
pub const MATCH_FIELDS: [&str; 3] = ["identity", "threshold", "distance"];
