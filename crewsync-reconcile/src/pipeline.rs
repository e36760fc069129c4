//! Shared reconciliation entrypoint used by the CLI and the integration tests.

use std::collections::BTreeSet;

use crewsync_core::{ExclusionSet, LaborGroup, NetId, Person, ReferenceCatalogs, Trade, UpstreamRecord};
use crewsync_planon::{Datastore, Filter, Resource};

use crate::driver::{PersonIndex, Reconciler};
use crate::error::PipelineError;
use crate::report::RunReport;

/// Planon field holding the netid.
pub const NETID_FIELD: &str = "FreeString7";

/// Options for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Decide every record but issue no saves.
    pub dry_run: bool,
    /// Restrict the run to these netids. `None` means every record.
    pub netids: Option<BTreeSet<NetId>>,
}

/// Load the active trade and labor-group catalogs.
pub fn load_catalogs<D: Datastore>(store: &D) -> Result<ReferenceCatalogs, PipelineError> {
    let trades: Vec<Trade> = store
        .find(&Filter::active())
        .map_err(|source| PipelineError::Catalog {
            resource: Trade::NAME,
            source,
        })?;
    let labor_groups: Vec<LaborGroup> = store
        .find(&Filter::active())
        .map_err(|source| PipelineError::Catalog {
            resource: LaborGroup::NAME,
            source,
        })?;

    let catalogs = ReferenceCatalogs::from_records(&trades, &labor_groups);
    tracing::info!(
        trades = catalogs.trades.len(),
        labor_groups = catalogs.labor_groups.len(),
        "loaded Planon catalogs"
    );
    Ok(catalogs)
}

/// Load every active Planon person that carries a netid.
pub fn load_persons<D: Datastore>(store: &D) -> Result<PersonIndex, PipelineError> {
    let persons: Vec<Person> = store
        .find(&Filter::active().exists(NETID_FIELD, true))
        .map_err(PipelineError::Persons)?;
    let index = PersonIndex::from_persons(persons);
    tracing::info!(persons = index.len(), "loaded Planon persons");
    Ok(index)
}

/// Run a full reconciliation of `records` against `store`.
///
/// Catalog and person loading failures abort the run. Per-record failures
/// only land in the returned report.
pub fn run<D: Datastore>(
    store: &D,
    records: &[UpstreamRecord],
    exclusions: &ExclusionSet,
    options: &RunOptions,
) -> Result<RunReport, PipelineError> {
    let mut report = RunReport::new(options.dry_run);
    let catalogs = load_catalogs(store)?;
    let persons = load_persons(store)?;

    let selected: Vec<UpstreamRecord>;
    let records = match &options.netids {
        Some(netids) => {
            selected = records
                .iter()
                .filter(|r| netids.contains(&r.netid))
                .cloned()
                .collect();
            tracing::info!(selected = selected.len(), of = records.len(), "restricted to requested netids");
            &selected[..]
        }
        None => records,
    };

    let reconciler = Reconciler {
        store,
        catalogs: &catalogs,
        exclusions,
        persons: &persons,
        dry_run: options.dry_run,
    };
    reconciler.reconcile_all(records, &mut report);
    report.finish();
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crewsync_core::Syscode;
    use crewsync_planon::MemoryStore;

    #[test]
    fn archived_catalog_entries_and_blank_codes_are_not_loaded() {
        let store = MemoryStore::new()
            .with_records([
                Trade { syscode: Syscode(1), code: Some("BAS".into()), is_archived: false },
                Trade { syscode: Syscode(2), code: Some("OLD".into()), is_archived: true },
                Trade { syscode: Syscode(3), code: None, is_archived: false },
            ])
            .expect("seed");

        let catalogs = load_catalogs(&store).expect("catalogs");
        assert_eq!(catalogs.trades.len(), 1);
        assert_eq!(catalogs.trades.syscode_for("BAS"), Some(Syscode(1)));
        assert!(catalogs.labor_groups.is_empty());
    }

    #[test]
    fn empty_store_and_no_records_gives_empty_report() {
        let store = MemoryStore::new();
        let report = run(&store, &[], &ExclusionSet::default(), &RunOptions::default()).expect("run");
        assert_eq!(report.processed(), 0);
        assert!(report.finished_at.is_some());
    }
}
