//! Researcher identity model

use super::author_name::AuthorName;
use super::pubmed::Pmid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Researcher whose publications are being retrieved
///
/// Owned by the retrieval engine for the duration of one pass and persisted
/// through the identity store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// Stable internal identifier
    pub uid: String,
    pub primary_name: AuthorName,
    #[serde(default)]
    pub alternate_names: Vec<AuthorName>,
    #[serde(default)]
    pub emails: BTreeSet<String>,
    /// Institutions recorded for this person in the directory
    #[serde(default)]
    pub affiliations: Vec<String>,
    #[serde(default)]
    pub departments: Vec<String>,
    /// Grant identifiers (e.g. "R01 CA123456")
    #[serde(default)]
    pub grants: Vec<String>,
    /// Externally verified record ids (gold standard)
    #[serde(default)]
    pub known_pmids: Vec<Pmid>,
    #[serde(default)]
    pub known_relationships: Vec<KnownRelationship>,
    #[serde(default)]
    pub date_initial_run: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_last_run: Option<DateTime<Utc>>,
    /// Name variants discovered in retrieved records
    #[serde(default)]
    pub pubmed_aliases: Vec<PubMedAlias>,
}

impl Identity {
    pub fn new(uid: impl Into<String>, primary_name: AuthorName) -> Self {
        Self {
            uid: uid.into(),
            primary_name,
            alternate_names: Vec::new(),
            emails: BTreeSet::new(),
            affiliations: Vec::new(),
            departments: Vec::new(),
            grants: Vec::new(),
            known_pmids: Vec::new(),
            known_relationships: Vec::new(),
            date_initial_run: None,
            date_last_run: None,
            pubmed_aliases: Vec::new(),
        }
    }

    /// Primary name followed by alternate names
    pub fn registered_names(&self) -> impl Iterator<Item = &AuthorName> {
        std::iter::once(&self.primary_name).chain(self.alternate_names.iter())
    }

    /// Whether `name` is already recorded as an alias
    pub fn has_alias(&self, name: &AuthorName) -> bool {
        self.pubmed_aliases.iter().any(|a| &a.author_name == name)
    }

    /// Stamp run dates: the initial run only once, the last run always
    pub fn mark_run(&mut self, now: DateTime<Utc>) {
        if self.date_initial_run.is_none() {
            self.date_initial_run = Some(now);
        }
        self.date_last_run = Some(now);
    }
}

/// Name variant observed on a retrieved record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PubMedAlias {
    pub author_name: AuthorName,
    /// Record the variant was observed on
    pub pmid: Pmid,
}

/// Known working relationship with another identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownRelationship {
    pub uid: String,
    pub name: AuthorName,
    pub relationship_type: RelationshipType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    CoInvestigator,
    Mentor,
    Mentee,
    Manager,
    Report,
    Hr,
}
