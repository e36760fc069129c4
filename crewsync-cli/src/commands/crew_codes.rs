//! `crewsync crew-codes`: show the crew code each employee resolves to.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crewsync_core::{ExclusionSet, UpstreamRecord};
use crewsync_reconcile::resolve;

use super::{netid_filter, transport, ConfigArgs, ExclusionArgs, IpaasArgs};

/// Arguments for `crewsync crew-codes`.
#[derive(Args, Debug)]
pub struct CrewCodesArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten)]
    pub exclusions: ExclusionArgs,

    #[command(flatten)]
    pub ipaas: IpaasArgs,

    /// Only show these netids (repeatable).
    #[arg(long = "netid", value_name = "NETID")]
    pub netids: Vec<String>,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct CrewCodeRow {
    netid: String,
    crew_code: Option<String>,
    conflict: Option<Vec<String>>,
}

#[derive(Tabled)]
struct CrewCodeTableRow {
    #[tabled(rename = "netid")]
    netid: String,
    #[tabled(rename = "crew code")]
    crew_code: String,
}

impl CrewCodesArgs {
    pub fn run(self) -> Result<ExitCode> {
        let settings = self.config.settings()?;
        let exclusions = self.exclusions.load(&settings)?;
        let transport = transport(&settings);

        let mut records = self.ipaas.employees(&transport, &settings)?;
        if let Some(netids) = netid_filter(&self.netids) {
            records.retain(|r| netids.contains(&r.netid));
        }
        let rows = build_rows(&records, &exclusions);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
            return Ok(ExitCode::SUCCESS);
        }

        let table_rows: Vec<_> = rows
            .into_iter()
            .map(|row| CrewCodeTableRow {
                netid: row.netid,
                crew_code: match (row.crew_code, row.conflict) {
                    (_, Some(codes)) => format!("conflict: {}", codes.join(", ")),
                    (Some(code), None) if !code.is_empty() => code,
                    _ => "-".to_string(),
                },
            })
            .collect();
        let mut table = Table::new(table_rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(ExitCode::SUCCESS)
    }
}

fn build_rows(records: &[UpstreamRecord], exclusions: &ExclusionSet) -> Vec<CrewCodeRow> {
    records
        .iter()
        .map(|record| match resolve(record, exclusions) {
            Ok(code) => CrewCodeRow {
                netid: record.netid.0.clone(),
                crew_code: Some(code),
                conflict: None,
            },
            Err(err) => CrewCodeRow {
                netid: record.netid.0.clone(),
                crew_code: None,
                conflict: Some(err.codes),
            },
        })
        .collect()
}
