//! Name variants searched for one identity during one retrieval pass

use super::author_name::AuthorName;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Where a searched name came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NameOrigin {
    /// Primary or alternate name registered on the identity
    Original,
    /// Derived by splitting a compound surname
    Derived,
}

/// Mapping from name origin to the set of names of that origin
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameVariantSet {
    variants: BTreeMap<NameOrigin, BTreeSet<AuthorName>>,
}

impl NameVariantSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, origin: NameOrigin, name: AuthorName) {
        self.variants.entry(origin).or_default().insert(name);
    }

    /// Names of one origin (empty if none recorded)
    pub fn get(&self, origin: NameOrigin) -> impl Iterator<Item = &AuthorName> {
        self.variants.get(&origin).into_iter().flatten()
    }

    pub fn original(&self) -> impl Iterator<Item = &AuthorName> {
        self.get(NameOrigin::Original)
    }

    pub fn derived(&self) -> impl Iterator<Item = &AuthorName> {
        self.get(NameOrigin::Derived)
    }

    pub fn has_derived(&self) -> bool {
        self.variants
            .get(&NameOrigin::Derived)
            .map_or(false, |names| !names.is_empty())
    }

    /// Distinct names across both origins, original names first
    pub fn all(&self) -> Vec<&AuthorName> {
        let mut seen = BTreeSet::new();
        self.original()
            .chain(self.derived())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    pub fn len(&self, origin: NameOrigin) -> usize {
        self.variants.get(&origin).map_or(0, BTreeSet::len)
    }
}
