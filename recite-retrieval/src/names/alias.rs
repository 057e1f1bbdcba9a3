//! Alias detection over retrieved records
//!
//! A record listing one of the identity's names exactly says nothing new. A
//! record where the only matching authors share the last name and first
//! initial suggests the researcher also publishes under that author name.

use recite_common::model::{AuthorName, Identity, Pmid, PubMedAlias, PubMedArticle};
use std::collections::{BTreeMap, BTreeSet};

/// Stateless detector of unregistered author-name variants
#[derive(Debug, Default, Clone, Copy)]
pub struct AliasDetector;

impl AliasDetector {
    pub fn new() -> Self {
        Self
    }

    /// Candidate alias names per record
    ///
    /// A record is skipped entirely as soon as one of its authors fully
    /// matches a known name. Otherwise the authors matching a known name on
    /// last name and first initial are collected; records with no such
    /// author are left out.
    pub fn detect<'a, I>(&self, records: I, known_names: &[&AuthorName]) -> BTreeMap<Pmid, Vec<AuthorName>>
    where
        I: IntoIterator<Item = &'a PubMedArticle>,
    {
        let mut candidates = BTreeMap::new();

        'records: for record in records {
            let mut found: Vec<AuthorName> = Vec::new();

            for author in record.author_names() {
                if known_names.iter().any(|known| known.is_full_name_match(&author)) {
                    continue 'records;
                }
                let partial = known_names
                    .iter()
                    .any(|known| known.is_last_name_and_first_initial_match(&author));
                if partial && !found.contains(&author) {
                    found.push(author);
                }
            }

            if !found.is_empty() {
                candidates.insert(record.pmid, found);
            }
        }

        candidates
    }

    /// Aliases not yet registered on `identity`, one per distinct name
    ///
    /// Candidates are visited in record-id order, so a name seen on several
    /// records is attributed to the lowest id.
    pub fn aliases_from(&self, candidates: &BTreeMap<Pmid, Vec<AuthorName>>, identity: &Identity) -> Vec<PubMedAlias> {
        let mut seen = BTreeSet::new();
        let mut aliases = Vec::new();

        for (pmid, names) in candidates {
            for name in names {
                if identity.has_alias(name) || !seen.insert(name.clone()) {
                    continue;
                }
                aliases.push(PubMedAlias {
                    author_name: name.clone(),
                    pmid: *pmid,
                });
            }
        }

        aliases
    }
}
