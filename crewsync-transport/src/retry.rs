//! Retry policy for the shared transport.

use std::collections::BTreeSet;
use std::time::Duration;

use crewsync_core::RetrySettings;

/// Bounded retry with exponential backoff.
///
/// A request is attempted at most `max_retries + 1` times. The wait before
/// retry `n` (1-based) is `backoff_factor * 2^(n-1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_factor: Duration,
    pub statuses: BTreeSet<u16>,
}

impl RetryPolicy {
    pub fn is_retryable(&self, status: u16) -> bool {
        self.statuses.contains(&status)
    }

    pub fn backoff(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(16);
        self.backoff_factor.saturating_mul(1u32 << exponent)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetrySettings::default())
    }
}

impl From<&RetrySettings> for RetryPolicy {
    fn from(settings: &RetrySettings) -> Self {
        Self {
            max_retries: settings.max_retries,
            backoff_factor: Duration::from_millis(settings.backoff_factor_ms),
            statuses: settings.statuses.iter().copied().collect(),
        }
    }
}
