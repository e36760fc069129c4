//! Optional YAML settings file.
//!
//! Credentials and endpoints come from the environment; this file only holds
//! tunables. Every field has a default, so an absent file and an empty file
//! are equivalent.
//!
//! ```yaml
//! exclusions_path: crew_codes_to_exclude.json
//! ipaas:
//!   scope: urn:dartmouth:employees:read.sensitive
//!   page_size: 1000
//! retry:
//!   max_retries: 5
//!   backoff_factor_ms: 1000
//!   statuses: [429, 500, 502, 503, 504]
//! http:
//!   timeout_secs: 60
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_err, ConfigError};
use crate::exclusions::DEFAULT_EXCLUSIONS_FILE;

pub const DEFAULT_SCOPE: &str = "urn:dartmouth:employees:read.sensitive";
pub const DEFAULT_PAGE_SIZE: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub exclusions_path: PathBuf,
    pub ipaas: IpaasSettings,
    pub retry: RetrySettings,
    pub http: HttpSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            exclusions_path: PathBuf::from(DEFAULT_EXCLUSIONS_FILE),
            ipaas: IpaasSettings::default(),
            retry: RetrySettings::default(),
            http: HttpSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IpaasSettings {
    /// Scope requested when exchanging the API key for a JWT. Empty means none.
    pub scope: String,
    pub page_size: usize,
}

impl Default for IpaasSettings {
    fn default() -> Self {
        Self {
            scope: DEFAULT_SCOPE.to_owned(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Bounded retry with exponential backoff: the n-th retry waits
/// `backoff_factor_ms * 2^(n-1)` milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetrySettings {
    pub max_retries: u32,
    pub backoff_factor_ms: u64,
    pub statuses: Vec<u16>,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: 5,
            backoff_factor_ms: 1000,
            statuses: vec![429, 500, 502, 503, 504],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpSettings {
    pub timeout_secs: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self { timeout_secs: 60 }
    }
}

impl Settings {
    /// Load and validate a settings file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        let settings: Settings = if contents.trim().is_empty() {
            Settings::default()
        } else {
            serde_yaml::from_str(&contents).map_err(|source| ConfigError::Yaml {
                path: path.to_path_buf(),
                source,
            })?
        };
        settings.validate(path)?;
        Ok(settings)
    }

    fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::Invalid {
            path: path.to_path_buf(),
            reason: reason.to_owned(),
        };
        if self.ipaas.page_size == 0 {
            return Err(invalid("ipaas.page_size must be at least 1"));
        }
        if self.http.timeout_secs == 0 {
            return Err(invalid("http.timeout_secs must be at least 1"));
        }
        if let Some(bad) = self.retry.statuses.iter().find(|s| !(100..=599).contains(*s)) {
            return Err(invalid(&format!("retry.statuses contains {bad}, not an HTTP status")));
        }
        Ok(())
    }
}
