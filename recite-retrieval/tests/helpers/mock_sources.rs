//! Scripted record sources
//!
//! Both mocks record every call so tests can assert on the queries the
//! engine built. Unscripted queries match nothing.

use async_trait::async_trait;
use recite_common::model::{DateWindow, Pmid, PubMedArticle, ScopusArticle};
use recite_retrieval::client::{PubMedSource, ScopusSource, SearchHits};
use recite_retrieval::error::{Result, RetrievalError};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Primary source mock
#[derive(Default)]
pub struct MockPubMed {
    responses: HashMap<String, SearchHits>,
    articles: HashMap<Pmid, PubMedArticle>,
    failing_queries: HashSet<String>,
    panicking_queries: HashSet<String>,
    fail_all: bool,
    delay: Option<Duration>,
    queries: Mutex<Vec<String>>,
    windows: Mutex<Vec<Option<DateWindow>>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockPubMed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `query` with `count` total matches and the given ids
    pub fn with_response(mut self, query: &str, count: u64, pmids: &[Pmid]) -> Self {
        self.responses.insert(
            query.to_string(),
            SearchHits {
                count,
                pmids: pmids.to_vec(),
            },
        );
        self
    }

    /// Full record returned by `fetch`; unregistered ids come back bare
    pub fn with_article(mut self, article: PubMedArticle) -> Self {
        self.articles.insert(article.pmid, article);
        self
    }

    pub fn failing_on(mut self, query: &str) -> Self {
        self.failing_queries.insert(query.to_string());
        self
    }

    pub fn panicking_on(mut self, query: &str) -> Self {
        self.panicking_queries.insert(query.to_string());
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail_all = true;
        self
    }

    pub fn with_delay(mut self, millis: u64) -> Self {
        self.delay = Some(Duration::from_millis(millis));
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn windows(&self) -> Vec<Option<DateWindow>> {
        self.windows.lock().unwrap().clone()
    }

    /// Highest number of searches observed running at the same time
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PubMedSource for MockPubMed {
    async fn search(&self, query: &str, window: Option<&DateWindow>) -> Result<SearchHits> {
        self.queries.lock().unwrap().push(query.to_string());
        self.windows.lock().unwrap().push(window.copied());

        if self.panicking_queries.contains(query) {
            panic!("scripted panic for query {}", query);
        }

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_all || self.failing_queries.contains(query) {
            return Err(RetrievalError::transport("pubmed", "connection reset by peer"));
        }

        Ok(self.responses.get(query).cloned().unwrap_or_default())
    }

    async fn fetch(&self, pmids: &[Pmid]) -> Result<Vec<PubMedArticle>> {
        Ok(pmids
            .iter()
            .map(|p| self.articles.get(p).cloned().unwrap_or_else(|| PubMedArticle::new(*p)))
            .collect())
    }
}

/// Secondary source mock
///
/// DOI lookups match the requested string exactly against the lowercased
/// record DOI, so a caller that forgets to lowercase finds nothing.
#[derive(Default)]
pub struct MockScopus {
    articles: Vec<ScopusArticle>,
    fail_pmid_lookup: bool,
    pmid_requests: Mutex<Vec<Vec<Pmid>>>,
    doi_requests: Mutex<Vec<Vec<String>>>,
}

impl MockScopus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_article(mut self, article: ScopusArticle) -> Self {
        self.articles.push(article);
        self
    }

    pub fn failing_pmid_lookup(mut self) -> Self {
        self.fail_pmid_lookup = true;
        self
    }

    pub fn pmid_requests(&self) -> Vec<Vec<Pmid>> {
        self.pmid_requests.lock().unwrap().clone()
    }

    pub fn doi_requests(&self) -> Vec<Vec<String>> {
        self.doi_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScopusSource for MockScopus {
    async fn find_by_pmids(&self, pmids: &[Pmid]) -> Result<Vec<ScopusArticle>> {
        self.pmid_requests.lock().unwrap().push(pmids.to_vec());
        if self.fail_pmid_lookup {
            return Err(RetrievalError::transport("scopus", "503 service unavailable"));
        }
        Ok(self
            .articles
            .iter()
            .filter(|a| a.pubmed_id.map_or(false, |p| pmids.contains(&p)))
            .cloned()
            .collect())
    }

    async fn find_by_dois(&self, dois: &[String]) -> Result<Vec<ScopusArticle>> {
        self.doi_requests.lock().unwrap().push(dois.to_vec());
        Ok(self
            .articles
            .iter()
            .filter(|a| {
                a.doi
                    .as_ref()
                    .map_or(false, |d| dois.iter().any(|requested| *requested == d.to_lowercase()))
            })
            .cloned()
            .collect())
    }
}
