//! Source B records (Scopus-like, independently keyed)

use super::pubmed::Pmid;
use serde::{Deserialize, Serialize};

/// Article retrieved from the secondary record source
///
/// `pubmed_id` is only present when the secondary source itself reported it
/// or when cross-source reconciliation attached a known Source A id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopusArticle {
    /// Secondary source's own record key
    pub eid: String,
    #[serde(default)]
    pub pubmed_id: Option<Pmid>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub affiliations: Vec<String>,
}

impl ScopusArticle {
    pub fn new(eid: impl Into<String>) -> Self {
        Self {
            eid: eid.into(),
            pubmed_id: None,
            doi: None,
            title: None,
            affiliations: Vec::new(),
        }
    }

    /// DOI lowercased for comparison with Source A DOIs
    pub fn normalized_doi(&self) -> Option<String> {
        self.doi
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_lowercase)
    }
}
