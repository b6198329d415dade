use std::path::PathBuf;
use thiserror::Error;

/// Catalogue loading and validation failures.
///
/// A bad catalogue invalidates every verdict, so these are raised once at
/// load time, before any check runs. Evaluation itself never fails: an empty
/// document is a legitimate input whose correct answer is "nothing found".
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read rules file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid rules JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate check id '{0}' in rule catalogue")]
    DuplicateCheckId(String),

    #[error("check '{check_id}' references unknown section '{section}'")]
    UnknownSection { check_id: String, section: String },
}
