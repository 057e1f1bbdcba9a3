//! Test Helper Utilities
//!
//! Shared utilities for testing recite-retrieval

#![allow(dead_code, unused_imports)]

pub mod fixtures;
pub mod log_capture;
pub mod mock_sources;

pub use fixtures::{
    article, article_with_doi, build_orchestrator, identity, scopus_article, settings, FailingPubMedStore,
};
pub use log_capture::{capture_logs, LogCapture};
pub use mock_sources::{MockPubMed, MockScopus};
