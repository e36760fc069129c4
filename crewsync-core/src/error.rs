//! Error types for crewsync-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading startup inputs (settings file, exclusion list).
///
/// Every variant is fatal: the run cannot start without valid inputs.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read (missing, permission denied, etc.).
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parse error, with file path and line context from serde_json.
    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// YAML parse error, with file path and line context from serde_yaml.
    #[error("failed to parse {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The file parsed but a value is out of range.
    #[error("invalid value in {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source,
    }
}
