//! `crewsync catalogs`: list the Planon trades and labor groups a run would
//! resolve crew codes against.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crewsync_core::Catalog;
use crewsync_reconcile::pipeline::load_catalogs;

use super::{transport, ConfigArgs, PlanonArgs};

/// Arguments for `crewsync catalogs`.
#[derive(Args, Debug)]
pub struct CatalogsArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten)]
    pub planon: PlanonArgs,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize, Tabled)]
struct CatalogRow {
    #[tabled(rename = "code")]
    code: String,
    #[tabled(rename = "syscode")]
    syscode: i64,
}

#[derive(Serialize)]
struct CatalogsJson {
    trades: Vec<CatalogRow>,
    labor_groups: Vec<CatalogRow>,
}

impl CatalogsArgs {
    pub fn run(self) -> Result<ExitCode> {
        let settings = self.config.settings()?;
        let transport = transport(&settings);
        let store = self.planon.client(&transport);
        let catalogs = load_catalogs(&store).context("failed to load Planon catalogs")?;

        let trades = rows(&catalogs.trades);
        let labor_groups = rows(&catalogs.labor_groups);
        if self.json {
            let json = CatalogsJson {
                trades,
                labor_groups,
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
            return Ok(ExitCode::SUCCESS);
        }

        for (title, entries) in [("Trades", trades), ("Labor groups", labor_groups)] {
            println!("{title} ({})", entries.len());
            let mut table = Table::new(entries);
            table.with(Style::rounded());
            println!("{table}");
        }
        Ok(ExitCode::SUCCESS)
    }
}

fn rows(catalog: &Catalog) -> Vec<CatalogRow> {
    catalog
        .sorted_entries()
        .into_iter()
        .map(|(code, syscode)| CatalogRow {
            code: code.to_owned(),
            syscode: syscode.0,
        })
        .collect()
}
