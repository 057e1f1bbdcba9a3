//! Retrieval strategies
//!
//! Each strategy contributes one kind of query for an identity. All of them
//! share the same execution: run the initial query, fall back to the strict
//! query when the initial one matches too many records, then fetch the
//! matching records from the primary source.
//!
//! # Strategies
//! 1. **gold_standard** - known accepted record ids
//! 2. **email** - the identity's email addresses
//! 3. **first_initial** - last name and first initial over all name variants
//! 4. **full_name** - last name and full first name
//! 5. **affiliation_in_db** - author AND directory institutions
//! 6. **affiliation** - author AND configured institution keywords
//! 7. **department** - author AND departments
//! 8. **grant** - author AND grant identifiers

pub mod affiliation;
pub mod affiliation_in_db;
pub mod department;
pub mod email;
pub mod first_initial;
pub mod full_name;
pub mod gold_standard;
pub mod grant;
pub mod query;

pub use affiliation::AffiliationStrategy;
pub use affiliation_in_db::AffiliationInDbStrategy;
pub use department::DepartmentStrategy;
pub use email::EmailStrategy;
pub use first_initial::FirstInitialStrategy;
pub use full_name::FullNameStrategy;
pub use gold_standard::GoldStandardStrategy;
pub use grant::GrantStrategy;

use crate::client::RecordSources;
use crate::config::RetrievalSettings;
use crate::error::Result;
use async_trait::async_trait;
use recite_common::model::{
    DateWindow, Identity, NameVariantSet, Pmid, QueryDiagnostic, RetrievalResult, ScopusArticle,
};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Strategy identity, also used as the persisted strategy name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StrategyKind {
    GoldStandard,
    Email,
    FirstInitial,
    FullName,
    AffiliationInDb,
    Affiliation,
    Department,
    Grant,
}

impl StrategyKind {
    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::GoldStandard => "gold_standard",
            StrategyKind::Email => "email",
            StrategyKind::FirstInitial => "first_name_initial",
            StrategyKind::FullName => "full_name",
            StrategyKind::AffiliationInDb => "affiliation_in_db",
            StrategyKind::Affiliation => "affiliation",
            StrategyKind::Department => "department",
            StrategyKind::Grant => "grant",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sources and switch threshold shared by every strategy
#[derive(Clone)]
pub struct StrategyContext {
    pub sources: RecordSources,
    pub strict_switch_threshold: u64,
}

impl StrategyContext {
    pub fn new(sources: RecordSources, strict_switch_threshold: u64) -> Self {
        Self {
            sources,
            strict_switch_threshold,
        }
    }
}

/// One query strategy
///
/// Implementors only build query strings. Execution, strict fallback and
/// record fetching are provided.
#[async_trait]
pub trait RetrievalStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    fn context(&self) -> &StrategyContext;

    /// Query for the first attempt; `None` when there is nothing to search for
    fn initial_query(&self, identity: &Identity, names: &NameVariantSet) -> Option<String>;

    /// Narrower query used in strict mode and when the initial query is too broad
    fn strict_query(&self, identity: &Identity, names: &NameVariantSet) -> Option<String> {
        self.initial_query(identity, names)
    }

    fn name(&self) -> &'static str {
        self.kind().name()
    }

    fn sources(&self) -> &RecordSources {
        &self.context().sources
    }

    fn strict_switch_threshold(&self) -> u64 {
        self.context().strict_switch_threshold
    }

    async fn retrieve(&self, identity: &Identity, names: &NameVariantSet, strict_only: bool) -> Result<RetrievalResult> {
        let initial = self.initial_query(identity, names);
        let strict = self.strict_query(identity, names);
        execute(self.context(), self.name(), initial, strict, None, strict_only).await
    }

    async fn retrieve_by_date_range(
        &self,
        identity: &Identity,
        names: &NameVariantSet,
        window: &DateWindow,
        strict_only: bool,
    ) -> Result<RetrievalResult> {
        let initial = self.initial_query(identity, names);
        let strict = self.strict_query(identity, names);
        execute(self.context(), self.name(), initial, strict, Some(window), strict_only).await
    }

    /// Fetch records directly by id, without searching
    async fn retrieve_by_ids(&self, pmids: &[Pmid]) -> Result<RetrievalResult> {
        let Some(query) = query::gold_standard_query(pmids) else {
            return Ok(RetrievalResult::empty());
        };

        let articles = self.sources().pubmed.fetch(pmids).await?;
        let mut result = RetrievalResult::empty();
        result.diagnostics.push(QueryDiagnostic {
            query,
            result_count: articles.len() as u64,
        });
        for article in articles {
            result.articles.entry(article.pmid).or_insert(article);
        }
        Ok(result)
    }

    /// Secondary-source records keyed by primary ids; empty without a secondary source
    async fn retrieve_secondary_by_pmids(&self, pmids: &[Pmid]) -> Result<Vec<ScopusArticle>> {
        match &self.sources().scopus {
            Some(scopus) if !pmids.is_empty() => scopus.find_by_pmids(pmids).await,
            _ => Ok(Vec::new()),
        }
    }

    /// Secondary-source records by lowercased DOI
    async fn retrieve_secondary_by_dois(&self, dois: &[String]) -> Result<Vec<ScopusArticle>> {
        match &self.sources().scopus {
            Some(scopus) if !dois.is_empty() => scopus.find_by_dois(dois).await,
            _ => Ok(Vec::new()),
        }
    }
}

/// Shared query execution with strict fallback
async fn execute(
    ctx: &StrategyContext,
    strategy: &'static str,
    initial: Option<String>,
    strict: Option<String>,
    window: Option<&DateWindow>,
    strict_only: bool,
) -> Result<RetrievalResult> {
    let mut result = RetrievalResult::empty();
    let pubmed = &ctx.sources.pubmed;

    let first_query = if strict_only { strict.clone().or(initial) } else { initial };
    let Some(first_query) = first_query else {
        debug!(strategy, "No query to build, skipping");
        return Ok(result);
    };

    let mut hits = pubmed.search(&first_query, window).await?;
    result.diagnostics.push(QueryDiagnostic {
        query: first_query.clone(),
        result_count: hits.count,
    });

    if !strict_only && hits.count > ctx.strict_switch_threshold {
        if let Some(strict_query) = strict.filter(|s| *s != first_query) {
            debug!(
                strategy,
                count = hits.count,
                threshold = ctx.strict_switch_threshold,
                "Initial query too broad, switching to strict query"
            );
            hits = pubmed.search(&strict_query, window).await?;
            result.diagnostics.push(QueryDiagnostic {
                query: strict_query,
                result_count: hits.count,
            });
        }
    }

    if hits.pmids.is_empty() {
        return Ok(result);
    }

    for article in pubmed.fetch(&hits.pmids).await? {
        result.articles.entry(article.pmid).or_insert(article);
    }

    debug!(strategy, records = result.len(), "Strategy retrieval complete");
    Ok(result)
}

/// The fixed set of strategies run during a pass
#[derive(Clone)]
pub struct StrategySet {
    pub gold_standard: Arc<dyn RetrievalStrategy>,
    pub email: Arc<dyn RetrievalStrategy>,
    pub first_initial: Arc<dyn RetrievalStrategy>,
    pub full_name: Arc<dyn RetrievalStrategy>,
    pub affiliation_in_db: Arc<dyn RetrievalStrategy>,
    pub affiliation: Arc<dyn RetrievalStrategy>,
    pub department: Arc<dyn RetrievalStrategy>,
    pub grant: Arc<dyn RetrievalStrategy>,
}

impl StrategySet {
    pub fn new(sources: RecordSources, settings: &RetrievalSettings) -> Self {
        let ctx = StrategyContext::new(sources, settings.strict_switch_threshold);
        Self {
            gold_standard: Arc::new(GoldStandardStrategy::new(ctx.clone())),
            email: Arc::new(EmailStrategy::new(ctx.clone())),
            first_initial: Arc::new(FirstInitialStrategy::new(ctx.clone())),
            full_name: Arc::new(FullNameStrategy::new(ctx.clone())),
            affiliation_in_db: Arc::new(AffiliationInDbStrategy::new(ctx.clone())),
            affiliation: Arc::new(AffiliationStrategy::new(ctx.clone(), settings.institution_keywords.clone())),
            department: Arc::new(DepartmentStrategy::new(ctx.clone())),
            grant: Arc::new(GrantStrategy::new(ctx)),
        }
    }

    /// Strategies run when the first-initial search is too broad, in run order
    pub fn broadening(&self) -> [&Arc<dyn RetrievalStrategy>; 5] {
        [
            &self.affiliation_in_db,
            &self.affiliation,
            &self.department,
            &self.grant,
            &self.full_name,
        ]
    }
}
