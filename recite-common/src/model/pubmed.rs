//! Source A records (PubMed-like, keyed by a numeric record id)

use super::author_name::AuthorName;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Numeric record id of a Source A article
pub type Pmid = i64;

/// Article retrieved from the primary record source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PubMedArticle {
    pub pmid: Pmid,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub journal: Option<String>,
    #[serde(default)]
    pub authors: Vec<ArticleAuthor>,
    /// Article location identifier; carries the DOI when one is known
    #[serde(default)]
    pub elocation_id: Option<ELocationId>,
    #[serde(default)]
    pub publication_date: Option<NaiveDate>,
}

impl PubMedArticle {
    pub fn new(pmid: Pmid) -> Self {
        Self {
            pmid,
            title: None,
            journal: None,
            authors: Vec::new(),
            elocation_id: None,
            publication_date: None,
        }
    }

    /// DOI carried in the article location field, as stored (not lowercased)
    ///
    /// Location ids of another declared type (e.g. "pii") are not DOIs and
    /// yield `None`. An untyped location id is taken as a DOI.
    pub fn doi(&self) -> Option<&str> {
        let location = self.elocation_id.as_ref()?;
        let is_doi = location
            .id_type
            .as_deref()
            .map_or(true, |t| t.eq_ignore_ascii_case("doi"));
        let value = location.value.trim();
        (is_doi && !value.is_empty()).then_some(value)
    }

    /// Author names that can be compared against identity names
    pub fn author_names(&self) -> impl Iterator<Item = AuthorName> + '_ {
        self.authors.iter().filter_map(ArticleAuthor::author_name)
    }
}

/// Article location identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ELocationId {
    #[serde(default)]
    pub id_type: Option<String>,
    pub value: String,
}

/// Author as listed on an article
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleAuthor {
    #[serde(default)]
    pub last_name: Option<String>,
    /// Given names, e.g. "John Adam"
    #[serde(default)]
    pub fore_name: Option<String>,
    #[serde(default)]
    pub initials: Option<String>,
    /// Group authorship ("The XYZ Consortium"); never an individual
    #[serde(default)]
    pub collective_name: Option<String>,
    #[serde(default)]
    pub affiliation: Option<String>,
}

impl ArticleAuthor {
    pub fn person(fore_name: &str, last_name: &str) -> Self {
        Self {
            last_name: Some(last_name.to_string()),
            fore_name: Some(fore_name.to_string()),
            ..Self::default()
        }
    }

    /// Convert to an `AuthorName`
    ///
    /// The fore name is split at the first whitespace into first and middle
    /// name; falls back to initials when no fore name is listed. Collective
    /// authors and authors without a last name yield `None`.
    pub fn author_name(&self) -> Option<AuthorName> {
        if self.collective_name.is_some() {
            return None;
        }
        let last_name = self.last_name.as_deref().map(str::trim).filter(|l| !l.is_empty())?;
        let given = self
            .fore_name
            .as_deref()
            .or(self.initials.as_deref())
            .map(str::trim)
            .filter(|g| !g.is_empty())?;

        let mut parts = given.splitn(2, char::is_whitespace);
        let first = parts.next().unwrap_or_default();
        let middle = parts.next().map(str::trim);
        Some(AuthorName::new(first, middle, last_name))
    }
}
