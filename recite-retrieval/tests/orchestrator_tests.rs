//! Integration tests for the retrieval orchestrator
//!
//! Each test wires scripted record sources and an in-memory store into an
//! orchestrator and runs a single pass.

mod helpers;

use chrono::NaiveDate;
use helpers::*;
use recite_common::model::{AuthorName, DateWindow, RetrievalMode};
use recite_retrieval::store::{IdentityStore, MemoryStore, Stores};
use recite_retrieval::{RecordSources, RetrievalError, RetrievalOrchestrator};
use std::sync::Arc;

const SMITH_INITIAL: &str = "Smith J[au]";

// ============================================================================
// Email and alias detection
// ============================================================================

#[tokio::test]
async fn test_email_records_produce_one_alias_and_stamp_dates() {
    let pubmed = Arc::new(
        MockPubMed::new()
            .with_response("jsmith@med.edu", 3, &[1, 2, 4])
            .with_article(article(1, &[("Jonathan", "Smith"), ("Mary", "Jones")]))
            .with_article(article(2, &[("John A", "Smith"), ("Jo", "Smith")]))
            .with_article(article(4, &[("Wei", "Chen"), ("Mary", "Jones")]))
            .with_response(SMITH_INITIAL, 10, &[2, 3]),
    );
    let store = Arc::new(MemoryStore::new());
    let orchestrator = build_orchestrator(pubmed.clone(), None, store.clone(), settings());

    let mut identity = identity("u1", "John", Some("A"), "Smith");
    identity.emails.insert("jsmith@med.edu".to_string());

    let summary = orchestrator.run(&mut identity, &RetrievalMode::Full).await.unwrap();

    assert_eq!(summary.aliases_found, 1);
    assert_eq!(identity.pubmed_aliases.len(), 1);
    assert_eq!(identity.pubmed_aliases[0].pmid, 1);
    assert_eq!(identity.pubmed_aliases[0].author_name.first_name, "Jonathan");
    assert!(identity.date_initial_run.is_some());
    assert!(identity.date_last_run.is_some());

    let saved = store.identity("u1").await.unwrap();
    assert_eq!(saved.pubmed_aliases, identity.pubmed_aliases);
    assert_eq!(store.identity_save_count().await, 1);

    // email (1, 2, 4) merged with first initial (2, 3)
    assert_eq!(summary.unique_pmids, 4);
    assert!(!summary.broadened);
    assert_eq!(summary.strategies_persisted, vec!["email", "first_name_initial"]);
}

#[tokio::test]
async fn test_initial_run_date_is_kept_on_later_runs() {
    let pubmed = Arc::new(
        MockPubMed::new()
            .with_response("jsmith@med.edu", 1, &[1])
            .with_article(article(1, &[("Jonathan", "Smith")])),
    );
    let store = Arc::new(MemoryStore::new());
    let orchestrator = build_orchestrator(pubmed, None, store.clone(), settings());

    let mut identity = identity("u1", "John", None, "Smith");
    identity.emails.insert("jsmith@med.edu".to_string());
    let first_run = chrono::Utc::now() - chrono::Duration::days(30);
    identity.date_initial_run = Some(first_run);

    orchestrator.run(&mut identity, &RetrievalMode::Full).await.unwrap();
    orchestrator.run(&mut identity, &RetrievalMode::Full).await.unwrap();

    assert_eq!(identity.date_initial_run, Some(first_run));
    assert!(identity.date_last_run.unwrap() > first_run);
    // second run finds the same alias and does not add it again
    assert_eq!(identity.pubmed_aliases.len(), 1);
}

#[tokio::test]
async fn test_no_email_records_leaves_identity_unsaved() {
    let pubmed = Arc::new(MockPubMed::new().with_response(SMITH_INITIAL, 3, &[5]));
    let store = Arc::new(MemoryStore::new());
    let orchestrator = build_orchestrator(pubmed, None, store.clone(), settings());

    let mut identity = identity("u1", "John", None, "Smith");
    let summary = orchestrator.run(&mut identity, &RetrievalMode::Full).await.unwrap();

    assert_eq!(summary.aliases_found, 0);
    assert!(identity.date_last_run.is_none());
    assert_eq!(store.identity_save_count().await, 0);
}

// ============================================================================
// Gold standard
// ============================================================================

#[tokio::test]
async fn test_gold_standard_is_persisted_but_not_accumulated() {
    let pubmed = Arc::new(
        MockPubMed::new()
            .with_response("100[uid] OR 101[uid]", 2, &[100, 101])
            .with_response(SMITH_INITIAL, 1, &[7]),
    );
    let store = Arc::new(MemoryStore::new());
    let orchestrator = build_orchestrator(pubmed, None, store.clone(), settings());

    let mut identity = identity("u1", "John", None, "Smith");
    identity.known_pmids = vec![100, 101];

    let summary = orchestrator.run(&mut identity, &RetrievalMode::Full).await.unwrap();

    assert_eq!(summary.unique_pmids, 1);
    assert_eq!(summary.strategies_persisted[0], "gold_standard");
    assert_eq!(store.pubmed_pmids().await, vec![7, 100, 101]);
}

// ============================================================================
// Leniency threshold
// ============================================================================

async fn run_with_first_initial_count(count: u64) -> (recite_retrieval::PassSummary, Arc<MockPubMed>) {
    let pubmed = Arc::new(MockPubMed::new().with_response(SMITH_INITIAL, count, &[1, 2]));
    let store = Arc::new(MemoryStore::new());
    let orchestrator = build_orchestrator(pubmed.clone(), None, store, settings());

    let mut identity = identity("u1", "John", None, "Smith");
    identity.affiliations = vec!["Cornell".to_string()];
    identity.grants = vec!["R01 CA1".to_string()];

    let summary = orchestrator.run(&mut identity, &RetrievalMode::Full).await.unwrap();
    (summary, pubmed)
}

#[tokio::test]
async fn test_count_below_threshold_is_kept_without_broadening() {
    let (summary, pubmed) = run_with_first_initial_count(199).await;

    assert!(!summary.broadened);
    assert_eq!(summary.unique_pmids, 2);
    assert!(pubmed.queries().iter().all(|q| !q.contains(" AND ")));
}

#[tokio::test]
async fn test_count_at_threshold_neither_keeps_nor_broadens() {
    let (summary, pubmed) = run_with_first_initial_count(200).await;

    assert!(!summary.broadened);
    assert_eq!(summary.unique_pmids, 0);
    assert!(summary.strategies_persisted.is_empty());
    assert!(pubmed.queries().iter().all(|q| !q.contains(" AND ")));
}

#[tokio::test]
async fn test_count_above_threshold_runs_broadening_in_order() {
    let (summary, pubmed) = run_with_first_initial_count(201).await;

    assert!(summary.broadened);
    assert!(!summary.strict_query_only);
    assert_eq!(
        pubmed.queries(),
        vec![
            SMITH_INITIAL.to_string(),
            "Smith J[au] AND \"Cornell\"[affiliation]".to_string(),
            "Smith J[au] AND \"R01 CA1\"[gr]".to_string(),
            "Smith John[au]".to_string(),
        ]
    );
}

// ============================================================================
// Strict mode (compound surname)
// ============================================================================

#[tokio::test]
async fn test_compound_surname_forces_strict_broadening() {
    let first_initial = "(Vander Berg A[au] OR Berg A[au] OR Vander A[au])";
    let strict_affiliation =
        "(Vander Berg Anna[au] OR Berg Anna[au] OR Vander Anna[au]) AND \"Cornell\"[affiliation]";
    let pubmed = Arc::new(
        MockPubMed::new()
            .with_response(first_initial, 5, &[1])
            .with_response(strict_affiliation, 1, &[2]),
    );
    let store = Arc::new(MemoryStore::new());
    let orchestrator = build_orchestrator(pubmed.clone(), None, store.clone(), settings());

    let mut identity = identity("u1", "Anna", None, "Vander Berg");
    identity.affiliations = vec!["Cornell".to_string()];

    let summary = orchestrator.run(&mut identity, &RetrievalMode::Full).await.unwrap();

    assert!(summary.strict_query_only);
    assert!(summary.broadened);
    assert_eq!(summary.unique_pmids, 2);

    let queries = pubmed.queries();
    assert!(queries.contains(&first_initial.to_string()));
    assert!(queries.contains(&strict_affiliation.to_string()));
    assert_eq!(
        store.persisted_strategies("u1").await,
        vec!["first_name_initial", "affiliation_in_db"]
    );
}

#[tokio::test]
async fn test_suffix_and_accents_are_cleaned_before_querying() {
    let pubmed = Arc::new(MockPubMed::new());
    let store = Arc::new(MemoryStore::new());
    let orchestrator = build_orchestrator(pubmed.clone(), None, store, settings());

    let mut identity = identity("u1", "José", None, "Núñez, Jr");
    orchestrator.run(&mut identity, &RetrievalMode::Full).await.unwrap();

    assert_eq!(identity.primary_name.last_name, "Nunez");
    assert!(pubmed.queries().contains(&"Nunez J[au]".to_string()));
}

#[tokio::test]
async fn test_alternate_name_without_last_name_is_left_out_of_queries() {
    let pubmed = Arc::new(MockPubMed::new());
    let store = Arc::new(MemoryStore::new());
    let orchestrator = build_orchestrator(pubmed.clone(), None, store, settings());

    let mut identity = identity("u1", "John", None, "Smith");
    identity.alternate_names.push(AuthorName::new("Jane", None, ""));
    identity.alternate_names.push(AuthorName::new("Jim", None, "Jr"));

    orchestrator.run(&mut identity, &RetrievalMode::Full).await.unwrap();

    let queries = pubmed.queries();
    assert!(queries.contains(&SMITH_INITIAL.to_string()));
    for query in &queries {
        assert!(!query.replace(SMITH_INITIAL, "").contains("J[au]"), "bare initial term in {query}");
    }
}

// ============================================================================
// Degradation
// ============================================================================

#[tokio::test]
async fn test_transport_failure_degrades_single_strategy() {
    let (logs, _guard) = capture_logs();
    let pubmed = Arc::new(
        MockPubMed::new()
            .failing_on("jsmith@med.edu")
            .with_response(SMITH_INITIAL, 4, &[8]),
    );
    let store = Arc::new(MemoryStore::new());
    let orchestrator = build_orchestrator(pubmed, None, store.clone(), settings());

    let mut identity = identity("u1", "John", None, "Smith");
    identity.emails.insert("jsmith@med.edu".to_string());

    let summary = orchestrator.run(&mut identity, &RetrievalMode::Full).await.unwrap();

    assert_eq!(summary.unique_pmids, 1);
    assert_eq!(summary.strategies_persisted, vec!["first_name_initial"]);
    logs.assert_logged_for("Strategy failed", "u1");
}

#[tokio::test]
async fn test_persistence_failure_is_logged_and_pass_continues() {
    let (logs, _guard) = capture_logs();
    let pubmed = Arc::new(
        MockPubMed::new()
            .with_response("jsmith@med.edu", 1, &[1])
            .with_article(article(1, &[("Jonathan", "Smith")]))
            .with_response(SMITH_INITIAL, 2, &[2]),
    );
    let memory = Arc::new(MemoryStore::new());
    let stores = Stores {
        identities: memory.clone(),
        pubmed: Arc::new(FailingPubMedStore),
        search_results: memory.clone(),
        scopus: memory.clone(),
    };
    let orchestrator = RetrievalOrchestrator::new(RecordSources::new(pubmed.clone(), None), stores, settings());

    let mut identity = identity("u1", "John", None, "Smith");
    identity.emails.insert("jsmith@med.edu".to_string());

    let summary = orchestrator.run(&mut identity, &RetrievalMode::Full).await.unwrap();

    assert!(summary.strategies_persisted.is_empty());
    assert_eq!(summary.unique_pmids, 2);
    assert_eq!(summary.aliases_found, 1);
    assert!(memory.search_records().await.is_empty());
    logs.assert_logged_for("Failed to save records", "u1");
}

#[tokio::test]
async fn test_identity_without_last_name_is_rejected() {
    let pubmed = Arc::new(MockPubMed::new());
    let store = Arc::new(MemoryStore::new());
    let orchestrator = build_orchestrator(pubmed.clone(), None, store, settings());

    // "Jr" is a suffix, so nothing is left of the last name
    let mut identity = identity("u1", "John", None, "Jr");
    let err = orchestrator.run(&mut identity, &RetrievalMode::Full).await.unwrap_err();

    assert!(matches!(err, RetrievalError::InvalidIdentity { ref uid, .. } if uid == "u1"));
    assert!(pubmed.queries().is_empty());
}

// ============================================================================
// Date-range mode and direct lookup
// ============================================================================

#[tokio::test]
async fn test_date_range_pass_restricts_every_query() {
    let pubmed = Arc::new(MockPubMed::new().with_response(SMITH_INITIAL, 1, &[1]));
    let store = Arc::new(MemoryStore::new());
    let orchestrator = build_orchestrator(pubmed.clone(), None, store, settings());
    let window = DateWindow::new(
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2020, 12, 31).unwrap(),
    )
    .unwrap();

    let mut identity = identity("u1", "John", None, "Smith");
    identity.known_pmids = vec![42];
    identity.emails.insert("j@x.edu".to_string());

    let summary = orchestrator
        .run(&mut identity, &RetrievalMode::DateRange(window))
        .await
        .unwrap();

    assert_eq!(summary.mode, RetrievalMode::DateRange(window));
    let windows = pubmed.windows();
    assert_eq!(windows.len(), 3);
    assert!(windows.iter().all(|w| *w == Some(window)));
}

#[tokio::test]
async fn test_retrieve_by_pmids_persists_records_and_secondary_matches() {
    let pubmed = Arc::new(MockPubMed::new());
    let scopus = Arc::new(MockScopus::new().with_article(scopus_article("e-5", Some(5), None)));
    let store = Arc::new(MemoryStore::new());
    let orchestrator = build_orchestrator(pubmed, Some(scopus), store.clone(), settings());

    let result = orchestrator.retrieve_by_pmids("u1", &[5, 6]).await.unwrap();

    assert_eq!(result.pmids(), vec![5, 6]);
    assert_eq!(store.pubmed_pmids().await, vec![5, 6]);
    assert_eq!(store.persisted_strategies("u1").await, vec!["gold_standard"]);
    assert_eq!(store.scopus_articles().await.len(), 1);
    assert!(IdentityStore::find_by_uid(store.as_ref(), "u1").await.unwrap().is_none());
}
