//! Test fixtures: identities, records and wired-up orchestrators

use async_trait::async_trait;
use recite_common::model::{
    ArticleAuthor, AuthorName, ELocationId, Identity, Pmid, PubMedArticle, ScopusArticle,
};
use recite_common::{Error, Result};
use super::mock_sources::{MockPubMed, MockScopus};
use recite_retrieval::client::{RecordSources, ScopusSource};
use recite_retrieval::config::RetrievalSettings;
use recite_retrieval::store::{MemoryStore, PubMedStore, Stores};
use recite_retrieval::RetrievalOrchestrator;
use std::sync::Arc;

pub fn identity(uid: &str, first: &str, middle: Option<&str>, last: &str) -> Identity {
    Identity::new(uid, AuthorName::new(first, middle, last))
}

/// Record with the given (fore name, last name) authors
pub fn article(pmid: Pmid, authors: &[(&str, &str)]) -> PubMedArticle {
    let mut article = PubMedArticle::new(pmid);
    article.title = Some(format!("Article {}", pmid));
    article.authors = authors
        .iter()
        .map(|(fore, last)| ArticleAuthor::person(fore, last))
        .collect();
    article
}

pub fn article_with_doi(pmid: Pmid, doi: &str) -> PubMedArticle {
    let mut article = PubMedArticle::new(pmid);
    article.elocation_id = Some(ELocationId {
        id_type: Some("doi".to_string()),
        value: doi.to_string(),
    });
    article
}

pub fn scopus_article(eid: &str, pubmed_id: Option<Pmid>, doi: Option<&str>) -> ScopusArticle {
    let mut article = ScopusArticle::new(eid);
    article.pubmed_id = pubmed_id;
    article.doi = doi.map(str::to_string);
    article
}

/// Default thresholds, enrichment on, no institution keywords
pub fn settings() -> RetrievalSettings {
    RetrievalSettings::default()
}

/// Orchestrator over the mock sources, with every store backed by `store`
pub fn build_orchestrator(
    pubmed: Arc<MockPubMed>,
    scopus: Option<Arc<MockScopus>>,
    store: Arc<MemoryStore>,
    settings: RetrievalSettings,
) -> RetrievalOrchestrator {
    let scopus = scopus.map(|s| s as Arc<dyn ScopusSource>);
    RetrievalOrchestrator::new(
        RecordSources::new(pubmed, scopus),
        Stores::from_adapter(store),
        settings,
    )
}

/// Record store whose saves always fail
pub struct FailingPubMedStore;

#[async_trait]
impl PubMedStore for FailingPubMedStore {
    async fn save(&self, _articles: &[PubMedArticle]) -> Result<()> {
        Err(Error::Internal("disk full".to_string()))
    }

    async fn find_by_pmids(&self, _pmids: &[Pmid]) -> Result<Vec<PubMedArticle>> {
        Ok(Vec::new())
    }
}
