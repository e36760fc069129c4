//! crewsync core library: domain types, reference catalogs, settings, errors.
//!
//! Public API surface:
//! - [`types`]: upstream employee records and downstream Planon records
//! - [`catalog`]: syscode ↔ code lookup tables built once per run
//! - [`exclusions`]: crew codes that must never drive a downstream update
//! - [`settings`]: optional YAML tunables
//! - [`error`]: [`ConfigError`]

pub mod catalog;
pub mod error;
pub mod exclusions;
pub mod settings;
pub mod types;

pub use catalog::{Catalog, ReferenceCatalogs};
pub use error::ConfigError;
pub use exclusions::ExclusionSet;
pub use settings::{HttpSettings, IpaasSettings, RetrySettings, Settings};
pub use types::{Job, LaborGroup, MaintenanceCrew, NetId, Person, Syscode, Trade, UpstreamRecord};
