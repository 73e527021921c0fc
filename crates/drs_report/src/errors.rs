//! Rendering error taxonomy (spec §7's `InvalidInput` kind, at the render
//! boundary).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("xml error: {0}")]
    Xml(String),

    #[error("json error: {0}")]
    Json(String),

    #[error("report is missing required field `{0}`")]
    MissingField(&'static str),
}

impl From<quick_xml::Error> for ReportError {
    fn from(e: quick_xml::Error) -> Self {
        ReportError::Xml(e.to_string())
    }
}
