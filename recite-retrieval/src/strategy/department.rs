//! Department strategy

use super::query::{and_query, author_clause, author_term_full, author_term_initial, field_clause};
use super::{RetrievalStrategy, StrategyContext, StrategyKind};
use recite_common::model::{Identity, NameVariantSet};

pub struct DepartmentStrategy {
    ctx: StrategyContext,
}

impl DepartmentStrategy {
    pub fn new(ctx: StrategyContext) -> Self {
        Self { ctx }
    }
}

impl RetrievalStrategy for DepartmentStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Department
    }

    fn context(&self) -> &StrategyContext {
        &self.ctx
    }

    fn initial_query(&self, identity: &Identity, names: &NameVariantSet) -> Option<String> {
        and_query(
            author_clause(&names.all(), author_term_initial),
            field_clause(&identity.departments, "affiliation"),
        )
    }

    fn strict_query(&self, identity: &Identity, names: &NameVariantSet) -> Option<String> {
        and_query(
            author_clause(&names.all(), author_term_full),
            field_clause(&identity.departments, "affiliation"),
        )
    }
}
