//! First-initial strategy
//!
//! The broadest name search: last name plus first initial for every name
//! variant. Its primary result count decides whether the broadening
//! strategies run.

use super::query::{author_clause, author_term_full, author_term_initial};
use super::{RetrievalStrategy, StrategyContext, StrategyKind};
use recite_common::model::{Identity, NameVariantSet};

pub struct FirstInitialStrategy {
    ctx: StrategyContext,
}

impl FirstInitialStrategy {
    pub fn new(ctx: StrategyContext) -> Self {
        Self { ctx }
    }
}

impl RetrievalStrategy for FirstInitialStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::FirstInitial
    }

    fn context(&self) -> &StrategyContext {
        &self.ctx
    }

    fn initial_query(&self, _identity: &Identity, names: &NameVariantSet) -> Option<String> {
        author_clause(&names.all(), author_term_initial)
    }

    fn strict_query(&self, _identity: &Identity, names: &NameVariantSet) -> Option<String> {
        author_clause(&names.all(), author_term_full)
    }
}
