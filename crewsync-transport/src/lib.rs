//! # crewsync-transport
//!
//! Blocking HTTP transport shared by the iPaaS and Planon clients.
//!
//! Every request goes through [`Transport::execute`], which applies the
//! [`RetryPolicy`]: retryable statuses and connection failures are retried
//! with exponential backoff, and only the final failure reaches the caller as
//! a [`TransportError`].

pub mod error;
pub mod retry;

use std::thread;
use std::time::Duration;

pub use error::{read_json, TransportError};
pub use retry::RetryPolicy;

const USER_AGENT: &str = concat!("crewsync/", env!("CARGO_PKG_VERSION"));

/// A `ureq` agent plus the retry policy applied to every call.
#[derive(Clone)]
pub struct Transport {
    agent: ureq::Agent,
    policy: RetryPolicy,
}

impl Transport {
    pub fn new(policy: RetryPolicy, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build();
        Self { agent, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Send a request, retrying per policy.
    ///
    /// `send` is called once per attempt and must build and dispatch the
    /// whole request (method, URL, headers, query, body). `url` is only used
    /// for logging and error messages, so it must not carry secrets.
    pub fn execute<F>(&self, url: &str, send: F) -> Result<ureq::Response, TransportError>
    where
        F: Fn(&ureq::Agent) -> Result<ureq::Response, ureq::Error>,
    {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match send(&self.agent) {
                Ok(response) => return Ok(response),
                Err(ureq::Error::Status(status, response)) => {
                    let body = response.into_string().unwrap_or_default();
                    if self.policy.is_retryable(status) && attempt <= self.policy.max_retries {
                        self.wait_before_retry(url, attempt, &format!("HTTP {status}"));
                        continue;
                    }
                    return Err(TransportError::Status {
                        url: url.to_owned(),
                        status,
                        body,
                        attempts: attempt,
                    });
                }
                Err(ureq::Error::Transport(err)) => {
                    let message = err.to_string();
                    if is_transient(err.kind()) && attempt <= self.policy.max_retries {
                        self.wait_before_retry(url, attempt, &message);
                        continue;
                    }
                    return Err(TransportError::Network {
                        url: url.to_owned(),
                        message,
                        attempts: attempt,
                    });
                }
            }
        }
    }

    fn wait_before_retry(&self, url: &str, attempt: u32, cause: &str) {
        let wait = self.policy.backoff(attempt);
        tracing::warn!(
            url,
            attempt,
            wait_ms = wait.as_millis() as u64,
            cause,
            "request failed, retrying"
        );
        thread::sleep(wait);
    }
}

/// Connection-level failures worth another attempt. Timeouts surface as `Io`.
/// Bad URLs, unknown schemes and DNS failures fail on the first attempt.
fn is_transient(kind: ureq::ErrorKind) -> bool {
    matches!(kind, ureq::ErrorKind::ConnectionFailed | ureq::ErrorKind::Io)
}
