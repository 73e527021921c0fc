//! Error taxonomy for attribute-metadata and row ingestion (spec §7's
//! `InvalidInput` kind, at the ingestion boundary).

use thiserror::Error;

/// Ingestion-time failure. All variants are fatal at the boundary of the
/// offending parse/validate call, matching spec §7's `InvalidInput` kind.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("csv error: {0}")]
    Csv(String),

    #[error("json error: {0}")]
    Json(String),

    #[error("schema error: {0}")]
    Schema(String),

    #[error("attribute `{0}` is missing required metadata")]
    MissingAttributeMetadata(String),

    #[error("row references unknown attribute `{0}`")]
    UnknownAttributeName(String),

    #[error(transparent)]
    Core(#[from] drs_core::CoreError),
}

impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        IoError::Csv(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        IoError::Json(e.to_string())
    }
}
