//! Error types for crewsync-reconcile.

use serde::Serialize;
use thiserror::Error;

use crewsync_core::NetId;
use crewsync_planon::StoreError;

/// More than one distinct active crew code on one employee.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("employee '{netid}' has multiple active crew codes: {}", .codes.join(", "))]
pub struct ConflictError {
    pub netid: NetId,
    /// The distinct codes, sorted.
    pub codes: Vec<String>,
}

/// An expected downstream record is missing (deleted, archived or never
/// created).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupMiss {
    #[error("no Planon person with netid '{0}'")]
    Person(NetId),

    #[error("no active Planon trade with code '{0}'")]
    Trade(String),

    #[error("no active Planon labor group with code '{0}'")]
    LaborGroup(String),
}

/// Why one record failed. Caught at record scope; never aborts the batch.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Conflict(#[from] ConflictError),

    #[error(transparent)]
    LookupMiss(#[from] LookupMiss),

    #[error("save failed: {0}")]
    Persistence(#[from] StoreError),
}

/// Discriminant of [`RecordError`], kept in the run report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Conflict,
    LookupMiss,
    Persistence,
}

impl RecordError {
    pub fn kind(&self) -> FailureKind {
        match self {
            RecordError::Conflict(_) => FailureKind::Conflict,
            RecordError::LookupMiss(_) => FailureKind::LookupMiss,
            RecordError::Persistence(_) => FailureKind::Persistence,
        }
    }
}

/// Failures that stop the whole run before the per-record loop.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to load Planon {resource} catalog: {source}")]
    Catalog {
        resource: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("failed to load Planon persons: {0}")]
    Persons(#[source] StoreError),
}
