//! Error types for crewsync-ipaas.

use std::fmt;

use thiserror::Error;

use crewsync_transport::TransportError;

/// An upstream payload did not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct SchemaError {
    pub page: usize,
    /// Position inside the page, when the problem is a single element.
    pub index: Option<usize>,
    pub reason: String,
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unexpected employees payload on page {}", self.page)?;
        if let Some(index) = self.index {
            write!(f, ", element {index}")?;
        }
        write!(f, ": {}", self.reason)
    }
}

/// All errors that can arise while talking to iPaaS.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The token endpoint refused the credential.
    #[error("authentication failed (HTTP {status}): {payload}")]
    Authentication { status: u16, payload: String },

    /// The token endpoint answered 2xx without a usable `jwt` field.
    #[error("malformed token response: {0}")]
    MalformedToken(String),

    /// Transport failure after retries (non-2xx page, network error).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A page or element failed validation at the ingestion boundary.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}
