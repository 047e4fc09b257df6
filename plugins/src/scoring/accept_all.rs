use wcnprune_core::{PurityScoringStrategy, TypeHistogram};

/// Scores every category 1. Any threshold below 1 marks the whole graph pure,
/// which makes the run a plain bottom-up article aggregation.
pub struct AcceptAllStrategy;

impl PurityScoringStrategy for AcceptAllStrategy {
    fn name(&self) -> &str {
        "accept_all"
    }

    fn score(&self, _histogram: &TypeHistogram<'_>) -> f64 {
        1.0
    }
}
