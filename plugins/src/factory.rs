use std::sync::Arc;

use anyhow::{bail, Result};

use wcnprune_core::PurityScoringStrategy;

use crate::scoring::{
    AcceptAllStrategy, GiniCoefficientStrategy, GiniImpurityStrategy, TopGapStrategy,
};

/// Names accepted by [`build_strategy`], in the order they are listed to users.
pub const STRATEGY_NAMES: &[&str] = &["gini", "ginipurity", "m1m2diff", "accept_all"];

pub fn build_strategy(name: &str) -> Result<Arc<dyn PurityScoringStrategy>> {
    let strategy: Arc<dyn PurityScoringStrategy> = match name {
        "gini" => Arc::new(GiniCoefficientStrategy),
        "ginipurity" => Arc::new(GiniImpurityStrategy),
        "m1m2diff" => Arc::new(TopGapStrategy),
        "accept_all" => Arc::new(AcceptAllStrategy),
        other => bail!(
            "unknown scoring strategy '{other}' (expected one of: {})",
            STRATEGY_NAMES.join(", ")
        ),
    };
    tracing::debug!(strategy = strategy.name(), "scoring strategy selected");
    Ok(strategy)
}
