//! `crewsync run`: reconcile HR crew codes into Planon.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crewsync_reconcile::pipeline::{self, RunOptions};
use crewsync_reconcile::{RunReport, RunStatus};

use super::{netid_filter, transport, ConfigArgs, ExclusionArgs, IpaasArgs, PlanonArgs};

/// Arguments for `crewsync run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten)]
    pub exclusions: ExclusionArgs,

    #[command(flatten)]
    pub ipaas: IpaasArgs,

    #[command(flatten)]
    pub planon: PlanonArgs,

    /// Decide every record but save nothing.
    #[arg(long)]
    pub dry_run: bool,

    /// Only reconcile these netids (repeatable).
    #[arg(long = "netid", value_name = "NETID")]
    pub netids: Vec<String>,

    /// Print the run report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Also list the netids that were already consistent.
    #[arg(long, short)]
    pub verbose: bool,
}

impl RunArgs {
    pub fn run(self) -> Result<ExitCode> {
        let settings = self.config.settings()?;
        let exclusions = self.exclusions.load(&settings)?;
        let transport = transport(&settings);

        let records = self.ipaas.employees(&transport, &settings)?;
        let store = self.planon.client(&transport);
        let options = RunOptions {
            dry_run: self.dry_run,
            netids: netid_filter(&self.netids),
        };

        let report = pipeline::run(&store, &records, &exclusions, &options)
            .context("reconciliation aborted")?;
        report.log_summary();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_report(&report, self.verbose);
        }
        Ok(ExitCode::from(report.exit_code()))
    }
}

fn print_report(report: &RunReport, verbose: bool) {
    let prefix = if report.dry_run { "[dry-run] " } else { "" };
    let changed = if report.dry_run {
        &report.would_update
    } else {
        &report.updated
    };
    let verb = if report.dry_run { "would update" } else { "updated" };
    let elapsed = report
        .finished_at
        .map(|end| (end - report.started_at).num_milliseconds() as f64 / 1000.0)
        .unwrap_or_default();

    let mark = match report.status() {
        RunStatus::Success if report.failed.is_empty() => "✓".green(),
        RunStatus::Success => "!".yellow(),
        RunStatus::Unstable => "✗".red(),
    };
    println!(
        "{prefix}{mark} {} {verb}, {} unchanged, {} failed ({elapsed:.1}s)",
        changed.len(),
        report.skipped.len(),
        report.failed.len(),
    );

    for netid in changed {
        println!("  ✎  {netid}");
    }
    if verbose {
        for netid in &report.skipped {
            println!("  ·  {netid}");
        }
    }
    for failure in &report.failed {
        println!("  {}  {}: {}", "✗".red(), failure.netid, failure.message);
    }
}
