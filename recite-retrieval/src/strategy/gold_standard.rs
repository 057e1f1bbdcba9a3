//! Gold-standard strategy: records already accepted for the identity

use super::query::gold_standard_query;
use super::{RetrievalStrategy, StrategyContext, StrategyKind};
use recite_common::model::{Identity, NameVariantSet};

pub struct GoldStandardStrategy {
    ctx: StrategyContext,
}

impl GoldStandardStrategy {
    pub fn new(ctx: StrategyContext) -> Self {
        Self { ctx }
    }
}

impl RetrievalStrategy for GoldStandardStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::GoldStandard
    }

    fn context(&self) -> &StrategyContext {
        &self.ctx
    }

    fn initial_query(&self, identity: &Identity, _names: &NameVariantSet) -> Option<String> {
        gold_standard_query(&identity.known_pmids)
    }
}
