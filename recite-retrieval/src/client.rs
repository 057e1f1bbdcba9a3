//! External record source collaborators
//!
//! The engine builds query strings and hands them to these traits; how a
//! query reaches the external service is the implementor's concern. Every
//! method may fail with `RetrievalError::Transport`.

use crate::error::Result;
use async_trait::async_trait;
use recite_common::model::{DateWindow, Pmid, PubMedArticle, ScopusArticle};
use std::sync::Arc;

/// Matches reported by the primary source for one query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHits {
    /// Raw match count reported by the source (may exceed `pmids.len()`)
    pub count: u64,
    pub pmids: Vec<Pmid>,
}

/// Source A: numeric-id keyed bibliographic database
#[async_trait]
pub trait PubMedSource: Send + Sync {
    /// Run a query, optionally restricted to a publication date window
    async fn search(&self, query: &str, window: Option<&DateWindow>) -> Result<SearchHits>;

    /// Fetch full records for the given ids
    async fn fetch(&self, pmids: &[Pmid]) -> Result<Vec<PubMedArticle>>;
}

/// Source B: independently keyed bibliographic database
#[async_trait]
pub trait ScopusSource: Send + Sync {
    async fn find_by_pmids(&self, pmids: &[Pmid]) -> Result<Vec<ScopusArticle>>;

    /// Look up by DOI; callers pass lowercased DOIs
    async fn find_by_dois(&self, dois: &[String]) -> Result<Vec<ScopusArticle>>;
}

/// Record sources shared by every strategy
#[derive(Clone)]
pub struct RecordSources {
    pub pubmed: Arc<dyn PubMedSource>,
    /// Absent when no secondary source is configured
    pub scopus: Option<Arc<dyn ScopusSource>>,
}

impl RecordSources {
    pub fn new(pubmed: Arc<dyn PubMedSource>, scopus: Option<Arc<dyn ScopusSource>>) -> Self {
        Self { pubmed, scopus }
    }
}
