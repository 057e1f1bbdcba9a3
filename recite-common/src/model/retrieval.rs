//! Strategy results, diagnostics and retrieval modes

use super::pubmed::{Pmid, PubMedArticle};
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One executed query and the raw match count the record source reported
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryDiagnostic {
    pub query: String,
    pub result_count: u64,
}

/// Output of one strategy invocation
///
/// Produced fresh by every call and never mutated afterwards; callers merge
/// the articles by id into their own accumulator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetrievalResult {
    pub articles: BTreeMap<Pmid, PubMedArticle>,
    /// Executed queries in order; the first entry is the primary query
    pub diagnostics: Vec<QueryDiagnostic>,
}

impl RetrievalResult {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Raw match count of the primary query, if any query ran
    pub fn primary_result_count(&self) -> Option<u64> {
        self.diagnostics.first().map(|d| d.result_count)
    }

    pub fn pmids(&self) -> Vec<Pmid> {
        self.articles.keys().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }
}

/// Persisted log entry for one strategy's contribution to a pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultRecord {
    pub uid: String,
    pub strategy_name: String,
    pub pmids: Vec<Pmid>,
    pub diagnostics: Vec<QueryDiagnostic>,
    pub retrieved_at: DateTime<Utc>,
}

/// Inclusive publication date window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDateWindow")]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateWindow> for DateWindow {
    type Error = Error;

    fn try_from(raw: RawDateWindow) -> Result<Self> {
        DateWindow::new(raw.start, raw.end)
    }
}

impl DateWindow {
    /// # Errors
    /// Returns `Error::InvalidInput` if `start` is after `end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidInput(format!(
                "date window start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Batch retrieval mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetrievalMode {
    /// Re-retrieve all publications
    Full,
    /// Retrieve only publications inside the window
    DateRange(DateWindow),
}

impl RetrievalMode {
    pub fn window(&self) -> Option<&DateWindow> {
        match self {
            RetrievalMode::Full => None,
            RetrievalMode::DateRange(window) => Some(window),
        }
    }
}
