//! Map a canonical crew code and a Planon person into one comparable
//! code space.
//!
//! The crew code names both a trade and a labor group, so the source side is
//! always the same code twice. The target side is read off the person's
//! references through the syscode → code direction of each catalog.

use serde::Serialize;

use crewsync_core::{ExclusionSet, Person, ReferenceCatalogs, Syscode};

use crate::error::LookupMiss;

/// A (trade code, labor-group code) pair. `""` means "no reference".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CodePair {
    pub trade: String,
    pub labor_group: String,
}

impl CodePair {
    pub fn new(trade: impl Into<String>, labor_group: impl Into<String>) -> Self {
        Self {
            trade: trade.into(),
            labor_group: labor_group.into(),
        }
    }
}

/// Upstream-derived codes against what Planon currently holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub source: CodePair,
    pub target: CodePair,
}

impl Comparison {
    /// Both codes agree. The pair is compared as a unit.
    pub fn is_consistent(&self) -> bool {
        self.source == self.target
    }
}

/// Build the comparison for one person.
pub fn translate(
    code: &str,
    person: &Person,
    catalogs: &ReferenceCatalogs,
    exclusions: &ExclusionSet,
) -> Comparison {
    let source = if exclusions.contains(code) {
        CodePair::default()
    } else {
        CodePair::new(code, code)
    };

    let target = CodePair {
        trade: lookup_code(person.trade_ref, |s| catalogs.trades.code_for(s)),
        labor_group: lookup_code(person.labor_group_ref, |s| {
            catalogs.labor_groups.code_for(s)
        }),
    };

    Comparison { source, target }
}

fn lookup_code<'c>(reference: Option<Syscode>, code_for: impl Fn(Syscode) -> Option<&'c str>) -> String {
    reference
        .and_then(code_for)
        .map(str::to_owned)
        .unwrap_or_default()
}

/// Resolve a source pair to the references to store. An empty code clears
/// the reference.
pub fn target_refs(
    pair: &CodePair,
    catalogs: &ReferenceCatalogs,
) -> Result<(Option<Syscode>, Option<Syscode>), LookupMiss> {
    let trade = if pair.trade.is_empty() {
        None
    } else {
        Some(
            catalogs
                .trades
                .syscode_for(&pair.trade)
                .ok_or_else(|| LookupMiss::Trade(pair.trade.clone()))?,
        )
    };

    let labor_group = if pair.labor_group.is_empty() {
        None
    } else {
        Some(
            catalogs
                .labor_groups
                .syscode_for(&pair.labor_group)
                .ok_or_else(|| LookupMiss::LaborGroup(pair.labor_group.clone()))?,
        )
    };

    Ok((trade, labor_group))
}
