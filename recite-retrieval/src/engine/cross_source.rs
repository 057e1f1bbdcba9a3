//! Cross-source reconciliation
//!
//! The secondary source keys records by its own id and only sometimes knows
//! the primary id. Records are matched on primary id first. For primary
//! records left unmatched, the DOI carried on the primary record is
//! lowercased and looked up instead; a DOI hit without a primary id is given
//! the id of the primary record the DOI came from.

use crate::strategy::RetrievalStrategy;
use recite_common::model::{Pmid, PubMedArticle, ScopusArticle};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Secondary-source records found for one pass
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Reconciliation {
    /// Records found by primary id
    pub by_pmid: Vec<ScopusArticle>,
    /// Records found by DOI, with primary ids attached where missing
    pub by_doi: Vec<ScopusArticle>,
    /// How many DOI hits had a primary id attached
    pub attached: usize,
}

impl Reconciliation {
    pub fn is_empty(&self) -> bool {
        self.by_pmid.is_empty() && self.by_doi.is_empty()
    }
}

/// Reconciles primary records against the secondary source
///
/// Lookups go through a strategy's secondary-source operations. A failed
/// lookup is logged and treated as finding nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrossSourceResolver;

impl CrossSourceResolver {
    pub fn new() -> Self {
        Self
    }

    pub async fn reconcile(
        &self,
        uid: &str,
        strategy: &dyn RetrievalStrategy,
        articles: &BTreeMap<Pmid, PubMedArticle>,
    ) -> Reconciliation {
        let mut outcome = Reconciliation::default();
        if articles.is_empty() {
            return outcome;
        }

        let pmids: Vec<Pmid> = articles.keys().copied().collect();
        outcome.by_pmid = match strategy.retrieve_secondary_by_pmids(&pmids).await {
            Ok(found) => found,
            Err(e) => {
                warn!(uid = %uid, error = %e, "Secondary lookup by pmid failed, falling back to DOI");
                Vec::new()
            }
        };

        let matched: BTreeSet<Pmid> = outcome.by_pmid.iter().filter_map(|a| a.pubmed_id).collect();

        let mut doi_to_pmid: BTreeMap<String, Pmid> = BTreeMap::new();
        for (pmid, article) in articles {
            if matched.contains(pmid) {
                continue;
            }
            if let Some(doi) = article.doi() {
                doi_to_pmid.entry(doi.to_lowercase()).or_insert(*pmid);
            }
        }

        if doi_to_pmid.is_empty() {
            return outcome;
        }

        let dois: Vec<String> = doi_to_pmid.keys().cloned().collect();
        let mut by_doi = match strategy.retrieve_secondary_by_dois(&dois).await {
            Ok(found) => found,
            Err(e) => {
                warn!(uid = %uid, error = %e, dois = dois.len(), "Secondary lookup by DOI failed");
                Vec::new()
            }
        };

        for article in by_doi.iter_mut() {
            if article.pubmed_id.is_some() {
                continue;
            }
            if let Some(pmid) = article.normalized_doi().and_then(|doi| doi_to_pmid.get(&doi)) {
                article.pubmed_id = Some(*pmid);
                outcome.attached += 1;
            }
        }

        debug!(
            uid = %uid,
            by_pmid = outcome.by_pmid.len(),
            by_doi = by_doi.len(),
            attached = outcome.attached,
            "Cross-source reconciliation complete"
        );

        outcome.by_doi = by_doi;
        outcome
    }
}
