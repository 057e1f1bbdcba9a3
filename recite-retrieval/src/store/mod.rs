//! Persistence collaborators
//!
//! The engine only depends on these traits. Two adapters are provided:
//! - `SqliteStore`: sqlx-backed JSON document store
//! - `MemoryStore`: process-local maps, for tests and dry runs

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use recite_common::model::{Identity, Pmid, PubMedArticle, ScopusArticle, SearchResultRecord};
use recite_common::Result;
use std::sync::Arc;

/// Identity persistence; `save` is idempotent per uid
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn save(&self, identity: &Identity) -> Result<()>;
    async fn find_by_uid(&self, uid: &str) -> Result<Option<Identity>>;
    async fn find_all(&self) -> Result<Vec<Identity>>;
}

/// Source A record persistence; `save` is idempotent per pmid
#[async_trait]
pub trait PubMedStore: Send + Sync {
    async fn save(&self, articles: &[PubMedArticle]) -> Result<()>;
    async fn find_by_pmids(&self, pmids: &[Pmid]) -> Result<Vec<PubMedArticle>>;
}

/// Per-strategy search result log
#[async_trait]
pub trait SearchResultStore: Send + Sync {
    async fn save(&self, record: &SearchResultRecord) -> Result<()>;
    async fn find_by_uid(&self, uid: &str) -> Result<Vec<SearchResultRecord>>;
}

/// Source B record persistence; `save` is idempotent per eid
#[async_trait]
pub trait ScopusStore: Send + Sync {
    async fn save(&self, articles: &[ScopusArticle]) -> Result<()>;
    async fn find_by_pubmed_ids(&self, pmids: &[Pmid]) -> Result<Vec<ScopusArticle>>;
    /// DOIs are compared case-insensitively
    async fn find_by_dois(&self, dois: &[String]) -> Result<Vec<ScopusArticle>>;
}

/// Store collaborators used by the orchestrator
#[derive(Clone)]
pub struct Stores {
    pub identities: Arc<dyn IdentityStore>,
    pub pubmed: Arc<dyn PubMedStore>,
    pub search_results: Arc<dyn SearchResultStore>,
    pub scopus: Arc<dyn ScopusStore>,
}

impl Stores {
    /// All four collaborators backed by one adapter
    pub fn from_adapter<S>(adapter: Arc<S>) -> Self
    where
        S: IdentityStore + PubMedStore + SearchResultStore + ScopusStore + 'static,
    {
        Self {
            identities: adapter.clone(),
            pubmed: adapter.clone(),
            search_results: adapter.clone(),
            scopus: adapter,
        }
    }
}
