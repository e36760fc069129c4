//! Error types for crewsync-transport.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Final failure of a request after the retry policy gave up.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status} after {attempts} attempt(s): {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
        attempts: u32,
    },

    /// No usable response (DNS, connect, TLS, timeout).
    #[error("request to {url} failed after {attempts} attempt(s): {message}")]
    Network {
        url: String,
        message: String,
        attempts: u32,
    },

    /// The response arrived but its body could not be read.
    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// The body was read but is not the expected JSON.
    #[error("unexpected JSON from {url}: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl TransportError {
    /// HTTP status of a [`TransportError::Status`].
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body of a [`TransportError::Status`].
    pub fn body(&self) -> Option<&str> {
        match self {
            TransportError::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Deserialize a success body straight from the response stream.
///
/// Unlike `Response::into_string` this has no size cap. I/O failures while
/// reading become [`TransportError::Body`]; a body that is not the expected
/// JSON becomes [`TransportError::Json`].
pub fn read_json<T: DeserializeOwned>(url: &str, response: ureq::Response) -> Result<T, TransportError> {
    serde_json::from_reader(response.into_reader()).map_err(|err| {
        if err.is_io() {
            TransportError::Body {
                url: url.to_owned(),
                source: std::io::Error::from(err),
            }
        } else {
            TransportError::Json {
                url: url.to_owned(),
                source: err,
            }
        }
    })
}
