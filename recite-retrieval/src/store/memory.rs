//! In-process store adapter

use super::{IdentityStore, PubMedStore, ScopusStore, SearchResultStore};
use async_trait::async_trait;
use recite_common::model::{Identity, Pmid, PubMedArticle, ScopusArticle, SearchResultRecord};
use recite_common::Result;
use std::collections::{BTreeMap, HashSet};
use tokio::sync::RwLock;

/// Store adapter holding everything in memory
#[derive(Default)]
pub struct MemoryStore {
    identities: RwLock<BTreeMap<String, Identity>>,
    pubmed: RwLock<BTreeMap<Pmid, PubMedArticle>>,
    search_results: RwLock<Vec<SearchResultRecord>>,
    scopus: RwLock<BTreeMap<String, ScopusArticle>>,
    identity_saves: RwLock<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of identity saves performed (including re-saves)
    pub async fn identity_save_count(&self) -> usize {
        *self.identity_saves.read().await
    }

    pub async fn identity(&self, uid: &str) -> Option<Identity> {
        self.identities.read().await.get(uid).cloned()
    }

    pub async fn pubmed_pmids(&self) -> Vec<Pmid> {
        self.pubmed.read().await.keys().copied().collect()
    }

    pub async fn search_records(&self) -> Vec<SearchResultRecord> {
        self.search_results.read().await.clone()
    }

    /// Strategy names with a persisted search record, in save order
    pub async fn persisted_strategies(&self, uid: &str) -> Vec<String> {
        self.search_results
            .read()
            .await
            .iter()
            .filter(|r| r.uid == uid)
            .map(|r| r.strategy_name.clone())
            .collect()
    }

    pub async fn scopus_articles(&self) -> Vec<ScopusArticle> {
        self.scopus.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl IdentityStore for MemoryStore {
    async fn save(&self, identity: &Identity) -> Result<()> {
        self.identities
            .write()
            .await
            .insert(identity.uid.clone(), identity.clone());
        *self.identity_saves.write().await += 1;
        Ok(())
    }

    async fn find_by_uid(&self, uid: &str) -> Result<Option<Identity>> {
        Ok(self.identities.read().await.get(uid).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Identity>> {
        Ok(self.identities.read().await.values().cloned().collect())
    }
}

#[async_trait]
impl PubMedStore for MemoryStore {
    async fn save(&self, articles: &[PubMedArticle]) -> Result<()> {
        let mut map = self.pubmed.write().await;
        for article in articles {
            map.insert(article.pmid, article.clone());
        }
        Ok(())
    }

    async fn find_by_pmids(&self, pmids: &[Pmid]) -> Result<Vec<PubMedArticle>> {
        let map = self.pubmed.read().await;
        Ok(pmids.iter().filter_map(|p| map.get(p).cloned()).collect())
    }
}

#[async_trait]
impl SearchResultStore for MemoryStore {
    async fn save(&self, record: &SearchResultRecord) -> Result<()> {
        self.search_results.write().await.push(record.clone());
        Ok(())
    }

    async fn find_by_uid(&self, uid: &str) -> Result<Vec<SearchResultRecord>> {
        Ok(self
            .search_results
            .read()
            .await
            .iter()
            .filter(|r| r.uid == uid)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ScopusStore for MemoryStore {
    async fn save(&self, articles: &[ScopusArticle]) -> Result<()> {
        let mut map = self.scopus.write().await;
        for article in articles {
            map.insert(article.eid.clone(), article.clone());
        }
        Ok(())
    }

    async fn find_by_pubmed_ids(&self, pmids: &[Pmid]) -> Result<Vec<ScopusArticle>> {
        let wanted: HashSet<Pmid> = pmids.iter().copied().collect();
        Ok(self
            .scopus
            .read()
            .await
            .values()
            .filter(|a| a.pubmed_id.map_or(false, |p| wanted.contains(&p)))
            .cloned()
            .collect())
    }

    async fn find_by_dois(&self, dois: &[String]) -> Result<Vec<ScopusArticle>> {
        let wanted: HashSet<String> = dois.iter().map(|d| d.trim().to_lowercase()).collect();
        Ok(self
            .scopus
            .read()
            .await
            .values()
            .filter(|a| a.normalized_doi().map_or(false, |d| wanted.contains(&d)))
            .cloned()
            .collect())
    }
}
