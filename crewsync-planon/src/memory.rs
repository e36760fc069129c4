//! In-memory [`Datastore`] holding records in their wire form.
//!
//! Filters are evaluated exactly as [`Filter::matches`] defines them, so code
//! exercised against this store sees the same records it would get from
//! Planon for the same data.

use std::cell::RefCell;
use std::collections::BTreeMap;

use serde_json::Value;

use crewsync_core::Person;

use crate::error::StoreError;
use crate::filter::Filter;
use crate::resource::Resource;
use crate::Datastore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RefCell<BTreeMap<&'static str, Vec<Value>>>,
    saves: RefCell<Vec<Person>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record to its collection.
    pub fn insert<R: Resource>(&self, record: &R) -> Result<(), StoreError> {
        let value = serde_json::to_value(record).map_err(|source| StoreError::Decode {
            resource: R::NAME,
            source,
        })?;
        self.collections
            .borrow_mut()
            .entry(R::NAME)
            .or_default()
            .push(value);
        Ok(())
    }

    /// Builder form of [`MemoryStore::insert`] for a batch of records.
    pub fn with_records<R: Resource>(
        self,
        records: impl IntoIterator<Item = R>,
    ) -> Result<Self, StoreError> {
        for record in records {
            self.insert(&record)?;
        }
        Ok(self)
    }

    /// Every person passed to [`Datastore::save`], in call order.
    pub fn saves(&self) -> Vec<Person> {
        self.saves.borrow().clone()
    }

    /// Current stored state of one record.
    pub fn get<R: Resource>(&self, syscode: crewsync_core::Syscode) -> Option<R> {
        let collections = self.collections.borrow();
        collections
            .get(R::NAME)?
            .iter()
            .filter_map(|v| serde_json::from_value::<R>(v.clone()).ok())
            .find(|record| record.syscode() == syscode)
    }
}

impl Datastore for MemoryStore {
    fn find<R: Resource>(&self, filter: &Filter) -> Result<Vec<R>, StoreError> {
        let collections = self.collections.borrow();
        let Some(records) = collections.get(R::NAME) else {
            return Ok(Vec::new());
        };
        records
            .iter()
            .filter(|v| filter.matches(v))
            .map(|v| {
                serde_json::from_value(v.clone()).map_err(|source| StoreError::Decode {
                    resource: R::NAME,
                    source,
                })
            })
            .collect()
    }

    fn save(&self, person: &Person) -> Result<Person, StoreError> {
        let mut collections = self.collections.borrow_mut();
        let stored = collections
            .get_mut(Person::NAME)
            .and_then(|people| {
                people
                    .iter_mut()
                    .find(|v| v.get("Syscode").and_then(Value::as_i64) == Some(person.syscode.0))
            })
            .ok_or(StoreError::NotFound {
                resource: Person::NAME,
                syscode: person.syscode,
            })?;

        if let Value::Object(fields) = &mut *stored {
            fields.insert("TradeRef".into(), serde_json::json!(person.trade_ref));
            fields.insert(
                "WorkingHoursTariffGroupRef".into(),
                serde_json::json!(person.labor_group_ref),
            );
        }
        let updated: Person =
            serde_json::from_value(stored.clone()).map_err(|source| StoreError::Decode {
                resource: Person::NAME,
                source,
            })?;
        self.saves.borrow_mut().push(updated.clone());
        Ok(updated)
    }
}
