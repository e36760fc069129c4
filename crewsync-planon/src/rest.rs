//! Planon REST binding.
//!
//! - `POST {site}/read/{Resource}` with a [`Filter`] body returns a JSON array.
//! - `PUT {site}/update/Person/{Syscode}` with the changed fields returns the
//!   stored person.
//!
//! The API key travels in the `Authorization` header on every call.

use serde_json::json;

use crewsync_core::Person;
use crewsync_transport::{read_json, Transport, TransportError};

use crate::error::StoreError;
use crate::filter::Filter;
use crate::resource::Resource;
use crate::Datastore;

pub struct PlanonClient<'a> {
    transport: &'a Transport,
    site: String,
    api_key: String,
}

impl<'a> PlanonClient<'a> {
    pub fn new(transport: &'a Transport, site: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            transport,
            site: site.into().trim_end_matches('/').to_owned(),
            api_key: api_key.into(),
        }
    }
}

impl Datastore for PlanonClient<'_> {
    fn find<R: Resource>(&self, filter: &Filter) -> Result<Vec<R>, StoreError> {
        let url = format!("{}/read/{}", self.site, R::NAME);
        let response = self.transport.execute(&url, |agent| {
            agent
                .post(&url)
                .set("Authorization", &self.api_key)
                .send_json(filter)
        })?;
        let records: Vec<R> = read_json(&url, response).map_err(decode_error(R::NAME))?;
        tracing::debug!(resource = R::NAME, count = records.len(), "read records");
        Ok(records)
    }

    fn save(&self, person: &Person) -> Result<Person, StoreError> {
        let url = format!("{}/update/{}/{}", self.site, Person::NAME, person.syscode);
        let changes = json!({
            "TradeRef": person.trade_ref,
            "WorkingHoursTariffGroupRef": person.labor_group_ref,
        });
        let response = self
            .transport
            .execute(&url, |agent| {
                agent
                    .put(&url)
                    .set("Authorization", &self.api_key)
                    .send_json(&changes)
            })
            .map_err(|err| match err {
                TransportError::Status { status: 404, .. } => StoreError::NotFound {
                    resource: Person::NAME,
                    syscode: person.syscode,
                },
                TransportError::Status {
                    status: 400 | 409 | 422,
                    body,
                    ..
                } => StoreError::Rejected {
                    resource: Person::NAME,
                    syscode: person.syscode,
                    reason: body,
                },
                other => StoreError::Transport(other),
            })?;
        read_json(&url, response).map_err(decode_error(Person::NAME))
    }
}

/// Malformed JSON is a decode error for `resource`; anything else stays a
/// transport error.
fn decode_error(resource: &'static str) -> impl Fn(TransportError) -> StoreError {
    move |err| match err {
        TransportError::Json { source, .. } => StoreError::Decode { resource, source },
        other => StoreError::Transport(other),
    }
}
