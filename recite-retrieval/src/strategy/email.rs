//! Email strategy

use super::query::construct_email_query;
use super::{RetrievalStrategy, StrategyContext, StrategyKind};
use recite_common::model::{Identity, NameVariantSet};

/// Searches the identity's email addresses; records found this way feed
/// alias detection
pub struct EmailStrategy {
    ctx: StrategyContext,
}

impl EmailStrategy {
    pub fn new(ctx: StrategyContext) -> Self {
        Self { ctx }
    }
}

impl RetrievalStrategy for EmailStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Email
    }

    fn context(&self) -> &StrategyContext {
        &self.ctx
    }

    fn initial_query(&self, identity: &Identity, _names: &NameVariantSet) -> Option<String> {
        construct_email_query(&identity.emails)
    }
}
