//! Per-pass record accumulator

use recite_common::model::{Pmid, PubMedArticle, RetrievalResult};
use std::collections::BTreeMap;

/// Records collected for one identity during one pass
///
/// The first strategy to contribute a record id owns it. Later strategies
/// only add ids not seen yet, so merging the same result twice is the same
/// as merging it once.
#[derive(Debug, Default, Clone)]
pub struct ResultAccumulator {
    articles: BTreeMap<Pmid, PubMedArticle>,
}

impl ResultAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert-if-absent merge; returns how many ids were new
    pub fn merge(&mut self, result: &RetrievalResult) -> usize {
        let mut added = 0;
        for (pmid, article) in &result.articles {
            if !self.articles.contains_key(pmid) {
                self.articles.insert(*pmid, article.clone());
                added += 1;
            }
        }
        added
    }

    pub fn get(&self, pmid: Pmid) -> Option<&PubMedArticle> {
        self.articles.get(&pmid)
    }

    pub fn articles(&self) -> &BTreeMap<Pmid, PubMedArticle> {
        &self.articles
    }

    pub fn pmids(&self) -> Vec<Pmid> {
        self.articles.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}
