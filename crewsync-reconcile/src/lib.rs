//! # crewsync-reconcile
//!
//! Crew-code resolution, code-space translation and the batch driver.
//!
//! Call [`pipeline::run`] to load the Planon reference data and reconcile a
//! batch of upstream records, or use [`Reconciler`] directly when the
//! catalogs and person index are already in hand.

pub mod driver;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod resolver;
pub mod translate;

pub use driver::{Outcome, PersonIndex, Reconciler};
pub use error::{ConflictError, FailureKind, LookupMiss, PipelineError, RecordError};
pub use report::{Failure, RunReport, RunStatus, UNSTABLE_EXIT_CODE};
pub use resolver::resolve;
pub use translate::{target_refs, translate, CodePair, Comparison};
