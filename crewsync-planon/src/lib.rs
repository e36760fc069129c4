//! # crewsync-planon
//!
//! Downstream store access. The reconciliation driver only sees the
//! [`Datastore`] trait; [`PlanonClient`] binds it to the Planon REST API and
//! [`MemoryStore`] keeps records in memory with the same filter semantics.

pub mod error;
pub mod filter;
pub mod memory;
pub mod resource;
pub mod rest;

use crewsync_core::Person;

pub use error::StoreError;
pub use filter::{Filter, Predicate};
pub use memory::MemoryStore;
pub use resource::Resource;
pub use rest::PlanonClient;

/// A datastore returning and persisting typed Planon records.
pub trait Datastore {
    /// All records of type `R` matching `filter`.
    fn find<R: Resource>(&self, filter: &Filter) -> Result<Vec<R>, StoreError>;

    /// Persist the trade and labor-group references of `person` and return
    /// the stored record.
    fn save(&self, person: &Person) -> Result<Person, StoreError>;
}
