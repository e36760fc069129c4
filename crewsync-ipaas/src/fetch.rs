//! Paginated fetch of the employees collection.
//!
//! Pages are requested as `?pagesize=SIZE&page=N` starting at `N = 1`. A page
//! with strictly fewer than `SIZE` elements is the last one, so a collection
//! whose size is an exact multiple of `SIZE` costs one extra, empty request.

use std::collections::HashMap;

use serde_json::Value;

use crewsync_core::{NetId, UpstreamRecord};
use crewsync_transport::{read_json, Transport, TransportError};

use crate::error::{FetchError, SchemaError};

pub struct Fetcher<'a> {
    transport: &'a Transport,
    page_size: usize,
}

impl<'a> Fetcher<'a> {
    pub fn new(transport: &'a Transport, page_size: usize) -> Self {
        Self {
            transport,
            page_size: page_size.max(1),
        }
    }

    /// Fetch every page of `base_url` with a bearer `token`, preserving
    /// response order across pages.
    pub fn fetch_all(&self, token: &str, base_url: &str) -> Result<Vec<UpstreamRecord>, FetchError> {
        let bearer = format!("Bearer {token}");
        let page_size = self.page_size.to_string();
        let mut records = Vec::new();
        let mut page: usize = 1;

        loop {
            let page_param = page.to_string();
            let response = self.transport.execute(base_url, |agent| {
                agent
                    .get(base_url)
                    .set("Authorization", &bearer)
                    .set("Content-Type", "application/json")
                    .query("pagesize", &page_size)
                    .query("page", &page_param)
                    .call()
            })?;
            let body: Value = read_json(base_url, response).map_err(|err| match err {
                TransportError::Json { source, .. } => FetchError::Schema(SchemaError {
                    page,
                    index: None,
                    reason: format!("body is not JSON: {source}"),
                }),
                other => FetchError::Transport(other),
            })?;
            let elements = parse_page(body, page)?;
            let returned = elements.len();

            for (index, element) in elements.into_iter().enumerate() {
                records.push(validate_record(element, page, index)?);
            }
            tracing::debug!(page, returned, total = records.len(), "fetched page");

            if returned < self.page_size {
                break;
            }
            page += 1;
        }

        Ok(records)
    }
}

fn parse_page(body: Value, page: usize) -> Result<Vec<Value>, SchemaError> {
    match body {
        Value::Array(elements) => Ok(elements),
        other => Err(SchemaError {
            page,
            index: None,
            reason: format!("expected a JSON array, got {}", json_kind(&other)),
        }),
    }
}

/// Convert one raw element into a typed record, failing fast on bad shapes.
pub(crate) fn validate_record(
    element: Value,
    page: usize,
    index: usize,
) -> Result<UpstreamRecord, SchemaError> {
    let schema_err = |reason: String| SchemaError {
        page,
        index: Some(index),
        reason,
    };

    let Value::Object(ref fields) = element else {
        return Err(schema_err(format!(
            "expected an object, got {}",
            json_kind(&element)
        )));
    };
    match fields.get("netid") {
        Some(Value::String(netid)) if !netid.trim().is_empty() => {}
        Some(Value::String(_)) => return Err(schema_err("'netid' is empty".into())),
        Some(other) => {
            return Err(schema_err(format!(
                "'netid' must be a string, got {}",
                json_kind(other)
            )))
        }
        None => return Err(schema_err("missing 'netid'".into())),
    }

    serde_json::from_value(element).map_err(|e| schema_err(e.to_string()))
}

/// Collapse records sharing a netid. The later record wins but keeps the
/// position of the first occurrence.
pub fn dedupe_by_netid(records: Vec<UpstreamRecord>) -> Vec<UpstreamRecord> {
    let mut positions: HashMap<NetId, usize> = HashMap::with_capacity(records.len());
    let mut unique: Vec<UpstreamRecord> = Vec::with_capacity(records.len());
    for record in records {
        match positions.get(&record.netid) {
            Some(&pos) => {
                tracing::warn!(netid = %record.netid, "duplicate employee record, keeping the later one");
                unique[pos] = record;
            }
            None => {
                positions.insert(record.netid.clone(), unique.len());
                unique.push(record);
            }
        }
    }
    unique
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
