//! Full-name strategy

use super::query::{author_clause, author_term_full, author_term_full_with_middle};
use super::{RetrievalStrategy, StrategyContext, StrategyKind};
use recite_common::model::{Identity, NameVariantSet};

/// Last name and full first name; the strict form adds the middle initial
pub struct FullNameStrategy {
    ctx: StrategyContext,
}

impl FullNameStrategy {
    pub fn new(ctx: StrategyContext) -> Self {
        Self { ctx }
    }
}

impl RetrievalStrategy for FullNameStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::FullName
    }

    fn context(&self) -> &StrategyContext {
        &self.ctx
    }

    fn initial_query(&self, _identity: &Identity, names: &NameVariantSet) -> Option<String> {
        author_clause(&names.all(), author_term_full)
    }

    fn strict_query(&self, _identity: &Identity, names: &NameVariantSet) -> Option<String> {
        author_clause(&names.all(), author_term_full_with_middle)
    }
}
