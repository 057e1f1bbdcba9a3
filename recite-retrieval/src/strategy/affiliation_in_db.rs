//! Affiliation-in-directory strategy
//!
//! Author names AND any institution recorded for the identity in the
//! directory.

use super::query::{and_query, author_clause, author_term_full, author_term_initial, field_clause};
use super::{RetrievalStrategy, StrategyContext, StrategyKind};
use recite_common::model::{Identity, NameVariantSet};

pub struct AffiliationInDbStrategy {
    ctx: StrategyContext,
}

impl AffiliationInDbStrategy {
    pub fn new(ctx: StrategyContext) -> Self {
        Self { ctx }
    }
}

impl RetrievalStrategy for AffiliationInDbStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::AffiliationInDb
    }

    fn context(&self) -> &StrategyContext {
        &self.ctx
    }

    fn initial_query(&self, identity: &Identity, names: &NameVariantSet) -> Option<String> {
        and_query(
            author_clause(&names.all(), author_term_initial),
            field_clause(&identity.affiliations, "affiliation"),
        )
    }

    fn strict_query(&self, identity: &Identity, names: &NameVariantSet) -> Option<String> {
        and_query(
            author_clause(&names.all(), author_term_full),
            field_clause(&identity.affiliations, "affiliation"),
        )
    }
}
