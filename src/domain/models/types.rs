//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This module defines the parameter sets forwarded to the face engine and the result
// table shape the engine returns for database searches.
//
// | Section            | Description                                                      |
// |--------------------|------------------------------------------------------------------|
// | ENUMS              | Discrete analysis actions.                                       |
// | STRUCTS            | Parameters for each engine operation, search result tables.      |
// | DEFAULTS           | Engine-conventional defaults applied when a field is omitted.    |
// | TESTS              | Contains unit tests for the defined types.                       |
//--------------------------------------------------------------------------------------------------

//--------------------------------------------------------------------------------------------------
//  ENUMS
//--------------------------------------------------------------------------------------------------
// | Name          | Description                                  |
// |---------------|----------------------------------------------|
// | Action        | A demographic analysis the engine can run.   |
//--------------------------------------------------------------------------------------------------
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A demographic analysis requested from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Apparent age estimation.
    Age,
    /// Gender classification.
    Gender,
    /// Dominant emotion classification.
    Emotion,
    /// Race classification.
    Race,
}

impl Action {
    /// Every action, in the order the engine reports them.
    pub const ALL: [Action; 4] = [Action::Age, Action::Gender, Action::Emotion, Action::Race];
}

//--------------------------------------------------------------------------------------------------
//  STRUCTS
//--------------------------------------------------------------------------------------------------
// | Name             | Description                                          |
// |------------------|------------------------------------------------------|
// | RepresentParams  | Embedding extraction for one image.                  |
// | VerifyParams     | Same/different person decision for two images.       |
// | FindParams       | Search of one image against a reference database.    |
// | AnalyzeParams    | Demographic analysis of one image.                   |
// | ResultTable      | Column-oriented per-model search result.             |
//--------------------------------------------------------------------------------------------------

/// Parameters for embedding extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepresentParams {
    /// Path of the image to embed.
    pub img_path: String,

    /// Face recognition model used to produce the embedding.
    #[serde(default = "default_model_name")]
    pub model_name: String,

    /// Face detector backend.
    #[serde(default = "default_detector_backend")]
    pub detector_backend: String,

    /// Fail when no face is detected.
    #[serde(default = "default_true")]
    pub enforce_detection: bool,

    /// Align detected faces before embedding.
    #[serde(default = "default_true")]
    pub align: bool,

    /// Run the anti-spoofing check on detected faces.
    #[serde(default)]
    pub anti_spoofing: bool,

    /// Upper bound on the number of faces processed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_faces: Option<usize>,
}

impl RepresentParams {
    /// Creates parameters for `img_path` with every other field at its default.
    pub fn new(img_path: impl Into<String>) -> Self {
        Self {
            img_path: img_path.into(),
            model_name: default_model_name(),
            detector_backend: default_detector_backend(),
            enforce_detection: true,
            align: true,
            anti_spoofing: false,
            max_faces: None,
        }
    }
}

/// Parameters for pairwise verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyParams {
    /// First image of the pair.
    pub img1_path: String,

    /// Second image of the pair.
    pub img2_path: String,

    #[serde(default = "default_model_name")]
    pub model_name: String,

    #[serde(default = "default_detector_backend")]
    pub detector_backend: String,

    /// Metric used to compare the two embeddings.
    #[serde(default = "default_distance_metric")]
    pub distance_metric: String,

    #[serde(default = "default_true")]
    pub enforce_detection: bool,

    #[serde(default = "default_true")]
    pub align: bool,

    #[serde(default)]
    pub anti_spoofing: bool,
}

impl VerifyParams {
    /// Creates parameters for the pair with every other field at its default.
    pub fn new(img1_path: impl Into<String>, img2_path: impl Into<String>) -> Self {
        Self {
            img1_path: img1_path.into(),
            img2_path: img2_path.into(),
            model_name: default_model_name(),
            detector_backend: default_detector_backend(),
            distance_metric: default_distance_metric(),
            enforce_detection: true,
            align: true,
            anti_spoofing: false,
        }
    }
}

/// Parameters for a database search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindParams {
    /// Query image.
    pub img_path: String,

    /// Directory holding the reference images.
    pub db_path: String,

    #[serde(default = "default_model_name")]
    pub model_name: String,

    #[serde(default = "default_detector_backend")]
    pub detector_backend: String,

    #[serde(default = "default_distance_metric")]
    pub distance_metric: String,

    /// Input normalization applied before embedding.
    #[serde(default = "default_normalization")]
    pub normalization: String,

    #[serde(default = "default_true")]
    pub enforce_detection: bool,

    #[serde(default = "default_true")]
    pub align: bool,

    #[serde(default)]
    pub anti_spoofing: bool,

    /// Re-sync the engine's cached embeddings with the database directory.
    #[serde(default = "default_true")]
    pub refresh_database: bool,
}

impl FindParams {
    /// Creates parameters for the query with every other field at its default.
    pub fn new(img_path: impl Into<String>, db_path: impl Into<String>) -> Self {
        Self {
            img_path: img_path.into(),
            db_path: db_path.into(),
            model_name: default_model_name(),
            detector_backend: default_detector_backend(),
            distance_metric: default_distance_metric(),
            normalization: default_normalization(),
            enforce_detection: true,
            align: true,
            anti_spoofing: false,
            refresh_database: true,
        }
    }
}

/// Parameters for demographic analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeParams {
    /// Image to analyze.
    pub img_path: String,

    /// Analyses to run.
    #[serde(default = "default_actions")]
    pub actions: Vec<Action>,

    #[serde(default = "default_detector_backend")]
    pub detector_backend: String,

    #[serde(default = "default_true")]
    pub enforce_detection: bool,

    #[serde(default = "default_true")]
    pub align: bool,

    #[serde(default)]
    pub anti_spoofing: bool,
}

impl AnalyzeParams {
    /// Creates parameters for `img_path` running every action.
    pub fn new(img_path: impl Into<String>) -> Self {
        Self {
            img_path: img_path.into(),
            actions: default_actions(),
            detector_backend: default_detector_backend(),
            enforce_detection: true,
            align: true,
            anti_spoofing: false,
        }
    }
}

/// Column-oriented table produced by the engine for one recognition model.
///
/// Columns are not required to have equal lengths; the row count is the length
/// of the longest column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultTable {
    columns: BTreeMap<String, Vec<Value>>,
}

impl ResultTable {
    /// Creates a table with no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a column.
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<Value>) -> Self {
        self.columns.insert(name.into(), values);
        self
    }

    /// Number of rows in the table.
    pub fn len(&self) -> usize {
        self.columns.values().map(Vec::len).max().unwrap_or(0)
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Values of the named column, if present.
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Cell at `row` of the named column, if both exist.
    pub fn cell(&self, name: &str, row: usize) -> Option<&Value> {
        self.column(name).and_then(|values| values.get(row))
    }
}

//--------------------------------------------------------------------------------------------------
//  DEFAULTS
//--------------------------------------------------------------------------------------------------

pub const DEFAULT_MODEL_NAME: &str = "VGG-Face";
pub const DEFAULT_DETECTOR_BACKEND: &str = "opencv";
pub const DEFAULT_DISTANCE_METRIC: &str = "cosine";
pub const DEFAULT_NORMALIZATION: &str = "base";

fn default_model_name() -> String {
    DEFAULT_MODEL_NAME.to_string()
}

fn default_detector_backend() -> String {
    DEFAULT_DETECTOR_BACKEND.to_string()
}

fn default_distance_metric() -> String {
    DEFAULT_DISTANCE_METRIC.to_string()
}

fn default_normalization() -> String {
    DEFAULT_NORMALIZATION.to_string()
}

fn default_actions() -> Vec<Action> {
    Action::ALL.to_vec()
}

fn default_true() -> bool {
    true
}
