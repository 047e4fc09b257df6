use wcnprune_core::{PurityScoringStrategy, TypeHistogram};

/// Sum of squared type proportions, Σ(count / total)².
///
/// 1 for a single type, 1/k for k equally frequent types, 0 for an empty
/// histogram.
pub struct GiniImpurityStrategy;

impl PurityScoringStrategy for GiniImpurityStrategy {
    fn name(&self) -> &str {
        "ginipurity"
    }

    fn score(&self, histogram: &TypeHistogram<'_>) -> f64 {
        let total = histogram.total() as f64;
        histogram
            .counts()
            .map(|c| {
                let p = c as f64 / total;
                p * p
            })
            .sum()
    }
}
