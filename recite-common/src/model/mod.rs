//! Shared data model
//!
//! Identities being disambiguated, the bibliographic records retrieved for
//! them from the two external record sources, and the per-strategy results
//! exchanged between the retrieval engine and its stores.

pub mod author_name;
pub mod identity;
pub mod name_variants;
pub mod pubmed;
pub mod retrieval;
pub mod scopus;

pub use author_name::AuthorName;
pub use identity::{Identity, KnownRelationship, PubMedAlias, RelationshipType};
pub use name_variants::{NameOrigin, NameVariantSet};
pub use pubmed::{ArticleAuthor, ELocationId, PubMedArticle, Pmid};
pub use retrieval::{DateWindow, QueryDiagnostic, RetrievalMode, RetrievalResult, SearchResultRecord};
pub use scopus::ScopusArticle;
