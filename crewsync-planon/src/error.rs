//! Error types for crewsync-planon.

use thiserror::Error;

use crewsync_core::Syscode;
use crewsync_transport::TransportError;

/// All errors that can arise from datastore reads and saves.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP failure after retries.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The store returned records that do not match the expected shape.
    #[error("failed to decode {resource} records: {source}")]
    Decode {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A save targeted a record the store does not hold.
    #[error("{resource} {syscode} not found")]
    NotFound {
        resource: &'static str,
        syscode: Syscode,
    },

    /// The store refused the change.
    #[error("{resource} {syscode} rejected: {reason}")]
    Rejected {
        resource: &'static str,
        syscode: Syscode,
        reason: String,
    },
}
