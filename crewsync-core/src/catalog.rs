//! Reference catalogs: Planon trades and labor groups keyed both ways.
//!
//! Built once per run from the downstream store and never mutated afterwards.

use std::collections::HashMap;

use crate::types::{LaborGroup, Syscode, Trade};

/// A bidirectional syscode ↔ code table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    by_syscode: HashMap<Syscode, String>,
    by_code: HashMap<String, Syscode>,
}

impl Catalog {
    /// Build from `(syscode, code)` entries. Entries without a code, or with an
    /// empty one, are left out. On duplicate codes the later entry wins.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Syscode, Option<String>)>,
    {
        let mut catalog = Self::default();
        for (syscode, code) in entries {
            let Some(code) = code.filter(|c| !c.is_empty()) else {
                continue;
            };
            catalog.by_code.insert(code.clone(), syscode);
            catalog.by_syscode.insert(syscode, code);
        }
        catalog
    }

    pub fn code_for(&self, syscode: Syscode) -> Option<&str> {
        self.by_syscode.get(&syscode).map(String::as_str)
    }

    pub fn syscode_for(&self, code: &str) -> Option<Syscode> {
        self.by_code.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.by_syscode.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_syscode.is_empty()
    }

    /// Entries sorted by code, for display.
    pub fn sorted_entries(&self) -> Vec<(&str, Syscode)> {
        let mut entries: Vec<_> = self
            .by_code
            .iter()
            .map(|(code, syscode)| (code.as_str(), *syscode))
            .collect();
        entries.sort();
        entries
    }
}

/// Trade and labor-group catalogs for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceCatalogs {
    pub trades: Catalog,
    pub labor_groups: Catalog,
}

impl ReferenceCatalogs {
    pub fn from_records(trades: &[Trade], labor_groups: &[LaborGroup]) -> Self {
        Self {
            trades: Catalog::from_entries(trades.iter().map(|t| (t.syscode, t.code.clone()))),
            labor_groups: Catalog::from_entries(
                labor_groups.iter().map(|lg| (lg.syscode, lg.code.clone())),
            ),
        }
    }
}
