//! Per-record reconciliation and the batch loop.
//!
//! Each record runs `find person → resolve → compare → save`. Any failure is
//! logged where it is caught, recorded in the [`RunReport`] and the loop moves
//! on to the next record.

use std::collections::HashMap;

use crewsync_core::{ExclusionSet, NetId, Person, ReferenceCatalogs, UpstreamRecord};
use crewsync_planon::Datastore;

use crate::error::{LookupMiss, RecordError};
use crate::report::RunReport;
use crate::resolver::resolve;
use crate::translate::{target_refs, translate, Comparison};

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result of reconciling one record that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// References were changed and saved.
    Updated(Comparison),
    /// `--dry-run` mode: the references *would* have been saved.
    WouldUpdate(Comparison),
    /// Planon already agrees with the upstream crew code.
    Skipped,
}

// ---------------------------------------------------------------------------
// Person index
// ---------------------------------------------------------------------------

/// Planon persons keyed by netid.
#[derive(Debug, Clone, Default)]
pub struct PersonIndex(HashMap<NetId, Person>);

impl PersonIndex {
    /// Persons without a netid are left out. If two persons share a netid
    /// the later one wins.
    pub fn from_persons(persons: impl IntoIterator<Item = Person>) -> Self {
        let mut index = HashMap::new();
        for person in persons {
            let Some(netid) = person.netid.clone() else {
                continue;
            };
            if let Some(previous) = index.insert(netid.clone(), person) {
                tracing::warn!(%netid, syscode = %previous.syscode, "duplicate Planon person for netid");
            }
        }
        Self(index)
    }

    pub fn get(&self, netid: &NetId) -> Option<&Person> {
        self.0.get(netid)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Reconciler
// ---------------------------------------------------------------------------

/// Everything one run needs, borrowed for the run's duration.
pub struct Reconciler<'a, D: Datastore> {
    pub store: &'a D,
    pub catalogs: &'a ReferenceCatalogs,
    pub exclusions: &'a ExclusionSet,
    pub persons: &'a PersonIndex,
    pub dry_run: bool,
}

impl<'a, D: Datastore> Reconciler<'a, D> {
    /// Reconcile a single upstream record. At most one save is issued.
    pub fn reconcile_record(&self, record: &UpstreamRecord) -> Result<Outcome, RecordError> {
        let person = self
            .persons
            .get(&record.netid)
            .ok_or_else(|| LookupMiss::Person(record.netid.clone()))?;

        let code = resolve(record, self.exclusions)?;
        let comparison = translate(&code, person, self.catalogs, self.exclusions);
        if comparison.is_consistent() {
            tracing::debug!(netid = %record.netid, code = %code, "already consistent");
            return Ok(Outcome::Skipped);
        }

        let (trade_ref, labor_group_ref) = target_refs(&comparison.source, self.catalogs)?;
        if self.dry_run {
            return Ok(Outcome::WouldUpdate(comparison));
        }

        let mut updated = person.clone();
        updated.trade_ref = trade_ref;
        updated.labor_group_ref = labor_group_ref;
        self.store.save(&updated)?;
        Ok(Outcome::Updated(comparison))
    }

    /// Reconcile every record into `report`. Never stops early.
    pub fn reconcile_all(&self, records: &[UpstreamRecord], report: &mut RunReport) {
        for record in records {
            let netid = &record.netid;
            match self.reconcile_record(record) {
                Ok(Outcome::Updated(cmp)) => {
                    tracing::info!(
                        %netid,
                        from_trade = %cmp.target.trade,
                        from_labor_group = %cmp.target.labor_group,
                        to = %cmp.source.trade,
                        "updated crew code"
                    );
                    report.updated.push(netid.clone());
                }
                Ok(Outcome::WouldUpdate(cmp)) => {
                    tracing::info!(
                        %netid,
                        from_trade = %cmp.target.trade,
                        from_labor_group = %cmp.target.labor_group,
                        to = %cmp.source.trade,
                        "would update crew code"
                    );
                    report.would_update.push(netid.clone());
                }
                Ok(Outcome::Skipped) => report.skipped.push(netid.clone()),
                Err(err) => {
                    tracing::error!(%netid, kind = ?err.kind(), "{err}");
                    report.record_failure(netid.clone(), &err);
                }
            }
        }
    }
}
