//! Derive the single active crew code of an upstream employee.

use std::collections::BTreeSet;

use crewsync_core::{ExclusionSet, UpstreamRecord};

use crate::error::ConflictError;

/// The active crew code of `record`, or `""` when it has none.
///
/// Only jobs with status exactly `"Active"` and a non-null, non-excluded crew
/// code count. Repeats of one code collapse; two or more distinct codes are a
/// [`ConflictError`] and are never auto-resolved.
pub fn resolve(record: &UpstreamRecord, exclusions: &ExclusionSet) -> Result<String, ConflictError> {
    let Some(jobs) = record.jobs.as_deref() else {
        tracing::debug!(netid = %record.netid, "employee has no jobs");
        return Ok(String::new());
    };

    let codes: BTreeSet<&str> = jobs
        .iter()
        .filter(|job| job.is_active())
        .filter_map(|job| job.crew_code())
        .filter(|code| !exclusions.contains(code))
        .collect();

    if codes.len() > 1 {
        return Err(ConflictError {
            netid: record.netid.clone(),
            codes: codes.into_iter().map(str::to_owned).collect(),
        });
    }
    Ok(codes.into_iter().next().unwrap_or_default().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crewsync_core::{Job, MaintenanceCrew};
    use rstest::rstest;

    fn exclusions() -> ExclusionSet {
        ["ML", "CEOPS"].into_iter().collect()
    }

    fn record(jobs: Vec<Job>) -> UpstreamRecord {
        UpstreamRecord::new("f000000", Some(jobs))
    }

    #[test]
    fn null_jobs_resolve_to_empty() {
        let record = UpstreamRecord::new("d13523b", None);
        assert_eq!(resolve(&record, &exclusions()).unwrap(), "");
    }

    #[rstest]
    #[case::no_jobs(vec![], "")]
    #[case::active_without_code(vec![Job::new(None, "Active")], "")]
    #[case::single_code(vec![Job::new(Some("ACS"), "Active")], "ACS")]
    #[case::repeated_code(
        vec![Job::new(Some("TS"), "Active"), Job::new(Some("TS"), "Active"), Job::new(Some("TS"), "Active")],
        "TS"
    )]
    #[case::inactive_ignored(vec![Job::new(Some("BAS"), "Active"), Job::new(Some("BR"), "Inactive")], "BAS")]
    #[case::null_code_beside_real_code(vec![Job::new(None, "Active"), Job::new(Some("BR"), "Active")], "BR")]
    #[case::inactive_duplicate_of_active(
        vec![Job::new(None, "Active"), Job::new(Some("BR"), "Inactive"), Job::new(Some("BR"), "Active")],
        "BR"
    )]
    #[case::excluded_beside_real_code(vec![Job::new(Some("ML"), "Active"), Job::new(Some("HLS"), "Active")], "HLS")]
    #[case::only_excluded(vec![Job::new(Some("CEOPS"), "Active")], "")]
    #[case::only_inactive(vec![Job::new(Some("BR"), "Inactive")], "")]
    #[case::status_is_case_sensitive(vec![Job::new(Some("BR"), "ACTIVE")], "")]
    fn resolves_single_active_code(#[case] jobs: Vec<Job>, #[case] expected: &str) {
        assert_eq!(resolve(&record(jobs), &exclusions()).unwrap(), expected);
    }

    #[test]
    fn job_without_crew_block_is_ignored() {
        let jobs = vec![
            Job {
                job_current_status: Some("Active".into()),
                maintenance_crew: None,
            },
            Job {
                job_current_status: Some("Active".into()),
                maintenance_crew: Some(MaintenanceCrew { crew_code: None }),
            },
            Job::new(Some("HLS"), "Active"),
        ];
        assert_eq!(resolve(&record(jobs), &exclusions()).unwrap(), "HLS");
    }

    #[rstest]
    #[case::two_codes(vec![Job::new(Some("BAS"), "Active"), Job::new(Some("BR"), "Active")], vec!["BAS", "BR"])]
    #[case::three_codes(
        vec![Job::new(Some("BR"), "Active"), Job::new(Some("BAS"), "Active"), Job::new(Some("ACS"), "Active")],
        vec!["ACS", "BAS", "BR"]
    )]
    fn distinct_active_codes_conflict(#[case] jobs: Vec<Job>, #[case] expected: Vec<&str>) {
        let err = resolve(&record(jobs), &exclusions()).unwrap_err();
        assert_eq!(err.netid.0, "f000000");
        assert_eq!(err.codes, expected);
        assert!(err.to_string().contains("f000000"), "got: {err}");
    }
}
