//! Domain types shared by the upstream fetcher, the Planon store and the
//! reconciliation driver.
//!
//! Upstream types mirror the iPaaS employees payload (snake_case fields).
//! Downstream types mirror Planon business objects (PascalCase fields); the
//! Rust field names are the domain names, the serde names are the wire names.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The literal job status that makes a job count toward the active crew code.
pub const ACTIVE_STATUS: &str = "Active";

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A person identifier shared by the HR source and Planon.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NetId(pub String);

impl fmt::Display for NetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for NetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NetId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Planon's internal numeric record identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Syscode(pub i64);

impl fmt::Display for Syscode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for Syscode {
    fn from(n: i64) -> Self {
        Self(n)
    }
}

// ---------------------------------------------------------------------------
// Upstream (iPaaS HR)
// ---------------------------------------------------------------------------

/// The facilities crew block nested inside a job.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MaintenanceCrew {
    #[serde(default)]
    pub crew_code: Option<String>,
}

/// One job assignment of an upstream employee.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Job {
    #[serde(default)]
    pub job_current_status: Option<String>,
    #[serde(default)]
    pub maintenance_crew: Option<MaintenanceCrew>,
}

impl Job {
    /// Convenience constructor, mostly for tests and fixtures.
    pub fn new(crew_code: Option<&str>, status: &str) -> Self {
        Self {
            job_current_status: Some(status.to_owned()),
            maintenance_crew: Some(MaintenanceCrew {
                crew_code: crew_code.map(str::to_owned),
            }),
        }
    }

    /// `true` only for the exact status `"Active"`.
    pub fn is_active(&self) -> bool {
        self.job_current_status.as_deref() == Some(ACTIVE_STATUS)
    }

    /// The crew code, if the job carries a non-null one.
    pub fn crew_code(&self) -> Option<&str> {
        self.maintenance_crew
            .as_ref()
            .and_then(|crew| crew.crew_code.as_deref())
    }
}

/// An employee as reported by the HR source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamRecord {
    pub netid: NetId,
    /// `None` when the source sends `null`; treated as "no jobs".
    #[serde(default)]
    pub jobs: Option<Vec<Job>>,
}

impl UpstreamRecord {
    pub fn new(netid: impl Into<NetId>, jobs: Option<Vec<Job>>) -> Self {
        Self {
            netid: netid.into(),
            jobs,
        }
    }
}

// ---------------------------------------------------------------------------
// Downstream (Planon)
// ---------------------------------------------------------------------------

/// A Planon person record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    #[serde(rename = "Syscode")]
    pub syscode: Syscode,
    #[serde(rename = "FreeString7", default)]
    pub netid: Option<NetId>,
    #[serde(rename = "TradeRef", default)]
    pub trade_ref: Option<Syscode>,
    #[serde(rename = "WorkingHoursTariffGroupRef", default)]
    pub labor_group_ref: Option<Syscode>,
    #[serde(rename = "IsArchived", default)]
    pub is_archived: bool,
}

/// A Planon trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    #[serde(rename = "Syscode")]
    pub syscode: Syscode,
    #[serde(rename = "Code", default)]
    pub code: Option<String>,
    #[serde(rename = "IsArchived", default)]
    pub is_archived: bool,
}

/// A Planon labor group (`WorkingHoursTariffGroup`). `Code` is optional in
/// Planon's configuration, so entries without one exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborGroup {
    #[serde(rename = "Syscode")]
    pub syscode: Syscode,
    #[serde(rename = "Code", default)]
    pub code: Option<String>,
    #[serde(rename = "IsArchived", default)]
    pub is_archived: bool,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
