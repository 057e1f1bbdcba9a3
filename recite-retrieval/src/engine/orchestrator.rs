//! Retrieval orchestrator
//!
//! Runs one retrieval pass for one identity. The same sequence is used for
//! full and date-ranged passes:
//!
//! 1. Normalize names; strict mode is on when a compound surname was split
//! 2. Gold standard (persisted, not merged)
//! 3. Email, followed by alias detection over its records
//! 4. First initial, kept only when its primary count is below the leniency threshold
//! 5. Broadening strategies when the first-initial search was too broad or
//!    strict mode is on
//! 6. Cross-source reconciliation of everything accumulated
//!
//! Transport and persistence failures degrade the affected step only.

use super::accumulator::ResultAccumulator;
use super::cross_source::CrossSourceResolver;
use crate::client::RecordSources;
use crate::config::RetrievalSettings;
use crate::error::{Result, RetrievalError};
use crate::names::{AliasDetector, NameNormalizer};
use crate::store::Stores;
use crate::strategy::{RetrievalStrategy, StrategySet};
use chrono::Utc;
use recite_common::model::{
    DateWindow, Identity, NameVariantSet, Pmid, RetrievalMode, RetrievalResult, ScopusArticle,
    SearchResultRecord,
};
use tracing::{debug, error, info, warn};

/// Outcome of one pass for one identity
#[derive(Debug, Clone, PartialEq)]
pub struct PassSummary {
    pub uid: String,
    pub mode: RetrievalMode,
    /// Whether broadening strategies ran in strict mode
    pub strict_query_only: bool,
    /// Whether the broadening strategies ran
    pub broadened: bool,
    /// Distinct record ids accumulated (gold standard excluded)
    pub unique_pmids: usize,
    pub aliases_found: usize,
    /// Strategy names whose results were persisted, in run order
    pub strategies_persisted: Vec<String>,
}

/// Per-identity retrieval state machine
pub struct RetrievalOrchestrator {
    strategies: StrategySet,
    stores: Stores,
    settings: RetrievalSettings,
    normalizer: NameNormalizer,
    alias_detector: AliasDetector,
    resolver: CrossSourceResolver,
}

impl RetrievalOrchestrator {
    pub fn new(sources: RecordSources, stores: Stores, settings: RetrievalSettings) -> Self {
        let strategies = StrategySet::new(sources, &settings);
        Self::with_strategies(strategies, stores, settings)
    }

    /// Build with an explicit strategy set
    pub fn with_strategies(strategies: StrategySet, stores: Stores, settings: RetrievalSettings) -> Self {
        Self {
            strategies,
            stores,
            settings,
            normalizer: NameNormalizer::new(),
            alias_detector: AliasDetector::new(),
            resolver: CrossSourceResolver::new(),
        }
    }

    pub fn settings(&self) -> &RetrievalSettings {
        &self.settings
    }

    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    /// Cross-source enrichment needs both the setting and a secondary source
    pub fn enrichment_enabled(&self) -> bool {
        self.settings.use_scopus_articles && self.strategies.gold_standard.sources().scopus.is_some()
    }

    /// Run one pass for `identity`
    ///
    /// The identity is normalized in place and gains any aliases found.
    /// Only an identity without a usable last name fails the pass.
    pub async fn run(&self, identity: &mut Identity, mode: &RetrievalMode) -> Result<PassSummary> {
        let window = mode.window();
        let names = self.normalizer.normalize(identity);

        if identity.primary_name.last_name.trim().is_empty() {
            return Err(RetrievalError::InvalidIdentity {
                uid: identity.uid.clone(),
                reason: "primary name has no last name".to_string(),
            });
        }

        let uid = identity.uid.clone();
        let strict_query_only = names.has_derived();
        let mut accumulator = ResultAccumulator::new();
        let mut persisted = Vec::new();
        let mut aliases_found = 0;

        info!(uid = %uid, mode = ?mode, strict_query_only, "Starting retrieval pass");

        // Gold standard
        let gold = self
            .execute(self.strategies.gold_standard.as_ref(), identity, &names, window, false)
            .await;
        self.persist(&uid, self.strategies.gold_standard.name(), &gold, &mut persisted)
            .await;

        // Email and alias detection
        let email = self
            .execute(self.strategies.email.as_ref(), identity, &names, window, false)
            .await;
        if !email.is_empty() {
            aliases_found = self.record_aliases(identity, &names, &email).await;
            accumulator.merge(&email);
        }
        self.persist(&uid, self.strategies.email.name(), &email, &mut persisted)
            .await;

        // First initial, never strict-only
        let first_initial = self
            .execute(self.strategies.first_initial.as_ref(), identity, &names, window, false)
            .await;
        let primary_count = first_initial.primary_result_count().unwrap_or(0) as f64;
        if primary_count < self.settings.leniency_threshold {
            accumulator.merge(&first_initial);
            self.persist(&uid, self.strategies.first_initial.name(), &first_initial, &mut persisted)
                .await;
        }

        let broadened = primary_count > self.settings.leniency_threshold || strict_query_only;
        if broadened {
            debug!(
                uid = %uid,
                primary_count,
                threshold = self.settings.leniency_threshold,
                strict_query_only,
                "Running broadening strategies"
            );
            for strategy in self.strategies.broadening() {
                let result = self
                    .execute(strategy.as_ref(), identity, &names, window, strict_query_only)
                    .await;
                accumulator.merge(&result);
                self.persist(&uid, strategy.name(), &result, &mut persisted).await;
            }
        }

        if self.enrichment_enabled() && !accumulator.is_empty() {
            let outcome = self
                .resolver
                .reconcile(&uid, self.strategies.gold_standard.as_ref(), accumulator.articles())
                .await;
            self.persist_secondary(&uid, &outcome.by_pmid).await;
            self.persist_secondary(&uid, &outcome.by_doi).await;
        }

        let summary = PassSummary {
            uid: uid.clone(),
            mode: *mode,
            strict_query_only,
            broadened,
            unique_pmids: accumulator.len(),
            aliases_found,
            strategies_persisted: persisted,
        };

        info!(
            uid = %uid,
            unique_pmids = summary.unique_pmids,
            aliases_found = summary.aliases_found,
            broadened = summary.broadened,
            "Retrieval pass complete"
        );

        Ok(summary)
    }

    /// Direct lookup of known record ids, outside of a pass
    pub async fn retrieve_by_pmids(&self, uid: &str, pmids: &[Pmid]) -> Result<RetrievalResult> {
        let gold_standard = &self.strategies.gold_standard;
        let result = gold_standard.retrieve_by_ids(pmids).await?;

        let mut persisted = Vec::new();
        self.persist(uid, gold_standard.name(), &result, &mut persisted).await;

        if self.enrichment_enabled() && !result.is_empty() {
            match gold_standard.retrieve_secondary_by_pmids(&result.pmids()).await {
                Ok(found) => self.persist_secondary(uid, &found).await,
                Err(e) => warn!(uid = %uid, error = %e, "Secondary lookup by pmid failed"),
            }
        }

        Ok(result)
    }

    /// Run a strategy, turning a failure into an empty contribution
    async fn execute(
        &self,
        strategy: &dyn RetrievalStrategy,
        identity: &Identity,
        names: &NameVariantSet,
        window: Option<&DateWindow>,
        strict_only: bool,
    ) -> RetrievalResult {
        let outcome = match window {
            Some(window) => strategy.retrieve_by_date_range(identity, names, window, strict_only).await,
            None => strategy.retrieve(identity, names, strict_only).await,
        };

        match outcome {
            Ok(result) => {
                debug!(
                    uid = %identity.uid,
                    strategy = strategy.name(),
                    records = result.len(),
                    primary_count = ?result.primary_result_count(),
                    "Strategy finished"
                );
                result
            }
            Err(e) => {
                warn!(
                    uid = %identity.uid,
                    strategy = strategy.name(),
                    error = %e,
                    "Strategy failed, continuing without its results"
                );
                RetrievalResult::empty()
            }
        }
    }

    /// Detect aliases in email results and save the identity; returns aliases added
    async fn record_aliases(&self, identity: &mut Identity, names: &NameVariantSet, email: &RetrievalResult) -> usize {
        let known = names.all();
        let candidates = self.alias_detector.detect(email.articles.values(), &known);
        let aliases = self.alias_detector.aliases_from(&candidates, identity);
        let added = aliases.len();

        if added > 0 {
            info!(uid = %identity.uid, aliases = added, "Found new name aliases");
        }
        identity.pubmed_aliases.extend(aliases);
        identity.mark_run(Utc::now());

        if let Err(e) = self.stores.identities.save(identity).await {
            error!(uid = %identity.uid, error = %e, "Failed to save identity");
        }

        added
    }

    /// Save a strategy's records and its search record; failures are logged
    async fn persist(&self, uid: &str, strategy_name: &str, result: &RetrievalResult, persisted: &mut Vec<String>) {
        if result.is_empty() {
            return;
        }

        let articles: Vec<_> = result.articles.values().cloned().collect();
        if let Err(e) = self.stores.pubmed.save(&articles).await {
            error!(uid = %uid, strategy = strategy_name, error = %e, "Failed to save records");
            return;
        }

        let record = SearchResultRecord {
            uid: uid.to_string(),
            strategy_name: strategy_name.to_string(),
            pmids: result.pmids(),
            diagnostics: result.diagnostics.clone(),
            retrieved_at: Utc::now(),
        };
        if let Err(e) = self.stores.search_results.save(&record).await {
            error!(uid = %uid, strategy = strategy_name, error = %e, "Failed to save search result");
            return;
        }

        persisted.push(strategy_name.to_string());
    }

    async fn persist_secondary(&self, uid: &str, articles: &[ScopusArticle]) {
        if articles.is_empty() {
            return;
        }
        if let Err(e) = self.stores.scopus.save(articles).await {
            error!(uid = %uid, count = articles.len(), error = %e, "Failed to save secondary records");
        }
    }
}
