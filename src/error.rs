//! Error types for loading startup parameter sets

use std::path::PathBuf;

/// Errors raised while reading parameter files or parsing selectors.
///
/// The projection engine itself never fails; only the outer layers that
/// read files or user input return these.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid JSON parameters: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown scenario '{0}' (expected one of: expected, best, worst)")]
    UnknownScenario(String),
}
