//! End-of-run accounting and exit classification.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crewsync_core::NetId;

use crate::error::{FailureKind, RecordError};

/// Exit code of a run where some person or catalog entry could not be found.
pub const UNSTABLE_EXIT_CODE: u8 = 57;

/// One failed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub netid: NetId,
    pub kind: FailureKind,
    pub message: String,
}

/// Overall classification of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Success,
    Unstable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub dry_run: bool,
    pub updated: Vec<NetId>,
    pub would_update: Vec<NetId>,
    pub skipped: Vec<NetId>,
    pub failed: Vec<Failure>,
}

impl RunReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            dry_run,
            updated: Vec::new(),
            would_update: Vec::new(),
            skipped: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn record_failure(&mut self, netid: NetId, err: &RecordError) {
        self.failed.push(Failure {
            netid,
            kind: err.kind(),
            message: err.to_string(),
        });
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// `Unstable` as soon as one failure is a lookup miss. Conflicts and
    /// persistence failures alone leave the run successful.
    pub fn status(&self) -> RunStatus {
        if self
            .failed
            .iter()
            .any(|f| f.kind == FailureKind::LookupMiss)
        {
            RunStatus::Unstable
        } else {
            RunStatus::Success
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self.status() {
            RunStatus::Success => 0,
            RunStatus::Unstable => UNSTABLE_EXIT_CODE,
        }
    }

    pub fn processed(&self) -> usize {
        self.updated.len() + self.would_update.len() + self.skipped.len() + self.failed.len()
    }

    /// Emit the end-of-run summary through `tracing`.
    pub fn log_summary(&self) {
        let elapsed_ms = self
            .finished_at
            .map(|end| (end - self.started_at).num_milliseconds());
        tracing::info!(
            processed = self.processed(),
            updated = self.updated.len(),
            would_update = self.would_update.len(),
            skipped = self.skipped.len(),
            failed = self.failed.len(),
            status = ?self.status(),
            elapsed_ms,
            "reconciliation finished"
        );
        if !self.updated.is_empty() {
            tracing::info!(netids = %join(&self.updated), "updated");
        }
        if !self.would_update.is_empty() {
            tracing::info!(netids = %join(&self.would_update), "would update");
        }
        if !self.skipped.is_empty() {
            tracing::debug!(netids = %join(&self.skipped), "already consistent");
        }
        for failure in &self.failed {
            tracing::warn!(netid = %failure.netid, kind = ?failure.kind, "{}", failure.message);
        }
    }
}

fn join(netids: &[NetId]) -> String {
    netids
        .iter()
        .map(|n| n.0.as_str())
        .collect::<Vec<_>>()
        .join(",")
}
