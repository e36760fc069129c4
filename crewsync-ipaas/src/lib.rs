//! # crewsync-ipaas
//!
//! Client for the iPaaS HR employees API.
//!
//! - [`auth::TokenClient`] exchanges the static API key for a JWT.
//! - [`fetch::Fetcher`] pages through the employees collection and validates
//!   every element into an [`UpstreamRecord`](crewsync_core::UpstreamRecord).
//! - [`IpaasClient`] wires both together for the standard endpoints.

pub mod auth;
pub mod error;
pub mod fetch;

use crewsync_core::UpstreamRecord;
use crewsync_transport::Transport;

pub use auth::TokenClient;
pub use error::{FetchError, SchemaError};
pub use fetch::{dedupe_by_netid, Fetcher};

/// Fully configured iPaaS client for `{base_url}/api/jwt` and
/// `{base_url}/api/employees`.
pub struct IpaasClient<'a> {
    transport: &'a Transport,
    base_url: String,
    api_key: String,
    scope: String,
    page_size: usize,
}

impl<'a> IpaasClient<'a> {
    pub fn new(
        transport: &'a Transport,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        scope: impl Into<String>,
        page_size: usize,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            api_key: api_key.into(),
            scope: scope.into(),
            page_size,
        }
    }

    /// Authenticate, fetch every employee, and collapse duplicate netids.
    pub fn employees(&self) -> Result<Vec<UpstreamRecord>, FetchError> {
        let token = TokenClient::new(self.transport).issue_token(
            &format!("{}/api/jwt", self.base_url),
            &self.api_key,
            &self.scope,
        )?;

        tracing::info!("fetching employees from iPaaS");
        let records = Fetcher::new(self.transport, self.page_size)
            .fetch_all(&token, &format!("{}/api/employees", self.base_url))?;
        let records = dedupe_by_netid(records);
        tracing::info!(count = records.len(), "fetched employees");
        Ok(records)
    }
}
