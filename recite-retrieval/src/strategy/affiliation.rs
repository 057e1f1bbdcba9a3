//! Free-text affiliation strategy

use super::query::{and_query, author_clause, author_term_full, author_term_initial, field_clause};
use super::{RetrievalStrategy, StrategyContext, StrategyKind};
use recite_common::model::{Identity, NameVariantSet};

/// Author names AND the configured institution keywords
///
/// Unlike [`super::AffiliationInDbStrategy`] the institutions come from
/// configuration, so the same keywords apply to every identity.
pub struct AffiliationStrategy {
    ctx: StrategyContext,
    institution_keywords: Vec<String>,
}

impl AffiliationStrategy {
    pub fn new(ctx: StrategyContext, institution_keywords: Vec<String>) -> Self {
        Self {
            ctx,
            institution_keywords,
        }
    }
}

impl RetrievalStrategy for AffiliationStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Affiliation
    }

    fn context(&self) -> &StrategyContext {
        &self.ctx
    }

    fn initial_query(&self, _identity: &Identity, names: &NameVariantSet) -> Option<String> {
        and_query(
            author_clause(&names.all(), author_term_initial),
            field_clause(&self.institution_keywords, "affiliation"),
        )
    }

    fn strict_query(&self, _identity: &Identity, names: &NameVariantSet) -> Option<String> {
        and_query(
            author_clause(&names.all(), author_term_full),
            field_clause(&self.institution_keywords, "affiliation"),
        )
    }
}
