//! Unified Error Model
use std::path::PathBuf;
use thiserror::Error;

use crate::data_model::CustomerImpact;

/// Rejected change input, surfaced to the user for correction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("VALIDATION/missing required field `{0}`")]
    MissingField(&'static str),

    #[error("VALIDATION/pick at least one system impacted")]
    NoSystems,

    #[error("VALIDATION/{field} is not a valid local timestamp: {value:?}")]
    MalformedTimestamp { field: &'static str, value: String },

    #[error("VALIDATION/planned end {end} is before planned start {start}")]
    EndBeforeStart { start: String, end: String },

    #[error("VALIDATION/unknown change type `{0}`")]
    UnknownChangeType(String),

    #[error("VALIDATION/customer impact `{0}` is not offered")]
    ImpactNotOffered(CustomerImpact),
}

/// Content configuration could not be loaded
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("CONTENT/read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CONTENT/yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CONTENT/json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CONTENT/duplicate risk rule code `{0}`")]
    DuplicateRule(String),

    #[error("CONTENT/duplicate system id {0}")]
    DuplicateSystem(u32),
}
