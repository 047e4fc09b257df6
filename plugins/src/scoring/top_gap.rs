use wcnprune_core::{PurityScoringStrategy, TypeHistogram};

/// Gap between the two most frequent types relative to the total,
/// `(max1 - max2) / total`. 1 when fewer than two types are present.
pub struct TopGapStrategy;

impl PurityScoringStrategy for TopGapStrategy {
    fn name(&self) -> &str {
        "m1m2diff"
    }

    fn score(&self, histogram: &TypeHistogram<'_>) -> f64 {
        if histogram.len() < 2 {
            return 1.0;
        }

        let (mut max1, mut max2) = (0u64, 0u64);
        for c in histogram.counts() {
            if c >= max1 {
                max2 = max1;
                max1 = c;
            } else if c > max2 {
                max2 = c;
            }
        }
        (max1 - max2) as f64 / histogram.total() as f64
    }
}
