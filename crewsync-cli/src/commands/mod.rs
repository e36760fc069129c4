//! Subcommand implementations and the argument groups they share.

pub mod catalogs;
pub mod crew_codes;
pub mod run;

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use crewsync_core::{ExclusionSet, NetId, Settings, UpstreamRecord};
use crewsync_ipaas::IpaasClient;
use crewsync_planon::PlanonClient;
use crewsync_transport::{RetryPolicy, Transport};

/// Settings file.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// YAML settings file with retry, paging and timeout tunables.
    #[arg(long, env = "CREWSYNC_CONFIG")]
    pub config: Option<PathBuf>,
}

impl ConfigArgs {
    pub fn settings(&self) -> Result<Settings> {
        match &self.config {
            Some(path) => Settings::load(path)
                .with_context(|| format!("failed to load settings from {}", path.display())),
            None => Ok(Settings::default()),
        }
    }
}

/// Exclusion list, for commands that resolve crew codes.
#[derive(Args, Debug)]
pub struct ExclusionArgs {
    /// Crew codes never pushed to Planon (JSON array, or YAML sequence).
    /// Defaults to `exclusions_path` from the settings file.
    #[arg(long)]
    pub exclusions: Option<PathBuf>,
}

impl ExclusionArgs {
    pub fn load(&self, settings: &Settings) -> Result<ExclusionSet> {
        let path = self.exclusions.as_ref().unwrap_or(&settings.exclusions_path);
        let exclusions = ExclusionSet::load(path)
            .with_context(|| format!("failed to load crew-code exclusions from {}", path.display()))?;
        tracing::info!(count = exclusions.len(), path = %path.display(), "loaded crew-code exclusions");
        Ok(exclusions)
    }
}

/// Upstream HR endpoint.
#[derive(Args, Debug)]
pub struct IpaasArgs {
    /// Base URL of the iPaaS HR API.
    #[arg(id = "ipaas_url", long = "ipaas-url", env = "DARTMOUTH_API_URL")]
    pub url: String,

    /// Static key exchanged for a JWT.
    #[arg(id = "ipaas_key", long = "ipaas-key", env = "DARTMOUTH_API_KEY", hide_env_values = true)]
    pub key: String,
}

impl IpaasArgs {
    pub fn employees(&self, transport: &Transport, settings: &Settings) -> Result<Vec<UpstreamRecord>> {
        IpaasClient::new(
            transport,
            &self.url,
            &self.key,
            &settings.ipaas.scope,
            settings.ipaas.page_size,
        )
        .employees()
        .context("failed to fetch employees from iPaaS")
    }
}

/// Downstream Planon endpoint.
#[derive(Args, Debug)]
pub struct PlanonArgs {
    /// Base URL of the Planon REST site.
    #[arg(id = "planon_url", long = "planon-url", env = "PLANON_API_URL")]
    pub url: String,

    /// Planon API key.
    #[arg(id = "planon_key", long = "planon-key", env = "PLANON_API_KEY", hide_env_values = true)]
    pub key: String,
}

impl PlanonArgs {
    pub fn client<'a>(&self, transport: &'a Transport) -> PlanonClient<'a> {
        PlanonClient::new(transport, &self.url, &self.key)
    }
}

pub fn transport(settings: &Settings) -> Transport {
    Transport::new(
        RetryPolicy::from(&settings.retry),
        Duration::from_secs(settings.http.timeout_secs),
    )
}

/// `--netid` values as a set, or `None` when none were given.
pub fn netid_filter(netids: &[String]) -> Option<BTreeSet<NetId>> {
    if netids.is_empty() {
        None
    } else {
        Some(netids.iter().map(|n| NetId::from(n.as_str())).collect())
    }
}
