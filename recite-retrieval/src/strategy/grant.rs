//! Grant strategy: author names AND grant identifiers

use super::query::{and_query, author_clause, author_term_full, author_term_initial, field_clause};
use super::{RetrievalStrategy, StrategyContext, StrategyKind};
use recite_common::model::{Identity, NameVariantSet};

pub struct GrantStrategy {
    ctx: StrategyContext,
}

impl GrantStrategy {
    pub fn new(ctx: StrategyContext) -> Self {
        Self { ctx }
    }
}

impl RetrievalStrategy for GrantStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Grant
    }

    fn context(&self) -> &StrategyContext {
        &self.ctx
    }

    fn initial_query(&self, identity: &Identity, names: &NameVariantSet) -> Option<String> {
        and_query(
            author_clause(&names.all(), author_term_initial),
            field_clause(&identity.grants, "gr"),
        )
    }

    fn strict_query(&self, identity: &Identity, names: &NameVariantSet) -> Option<String> {
        and_query(
            author_clause(&names.all(), author_term_full),
            field_clause(&identity.grants, "gr"),
        )
    }
}
