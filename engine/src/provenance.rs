//! Input -> output dependency records.
//!
//! A generated unit's provenance is the set of source declarations whose
//! member names appear in it. The host uses the set as the invalidation key
//! for that unit; nothing in this crate interprets it further.

use crate::diagnostics::{Messager, Severity};
use aptgen_decl::{DeclId, DeclarationQuery};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Provenance(BTreeSet<DeclId>);

impl Provenance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the declaration was already recorded.
    pub fn insert(&mut self, decl: DeclId) -> bool {
        self.0.insert(decl)
    }

    pub fn contains(&self, decl: &DeclId) -> bool {
        self.0.contains(decl)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeclId> {
        self.0.iter()
    }
}

impl FromIterator<DeclId> for Provenance {
    fn from_iter<I: IntoIterator<Item = DeclId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Provenance {
    type Item = &'a DeclId;
    type IntoIter = std::collections::btree_set::Iter<'a, DeclId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// One diagnostic per originating element, naming it by simple name.
pub fn report_provenance<Q: DeclarationQuery + ?Sized>(
    query: &Q,
    provenance: &Provenance,
    severity: Severity,
    messager: &mut dyn Messager,
) {
    for decl in provenance {
        let name = query.simple_name(decl).unwrap_or_else(|| decl.as_str());
        messager.report(severity, &format!("originating element: {}", name));
    }
}
