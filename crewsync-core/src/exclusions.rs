//! Crew codes that exist upstream but must never be pushed to Planon.
//!
//! The list is a static reference file loaded once at process start:
//! a JSON array of strings, or a YAML sequence for `.yaml` / `.yml` files.

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{io_err, ConfigError};

/// Default file name, resolved against the working directory.
pub const DEFAULT_EXCLUSIONS_FILE: &str = "crew_codes_to_exclude.json";

/// Immutable set of excluded crew codes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet(BTreeSet<String>);

impl ExclusionSet {
    /// Load from `path`. A missing or malformed file is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        let codes: Vec<String> = if is_yaml {
            serde_yaml::from_str(&contents).map_err(|source| ConfigError::Yaml {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?
        };
        if codes.iter().any(|c| c.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                reason: "excluded crew codes must be non-empty strings".into(),
            });
        }
        Ok(codes.into_iter().collect())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.contains(code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
