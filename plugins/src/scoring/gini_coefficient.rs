use wcnprune_core::{PurityScoringStrategy, TypeHistogram};

/// Number of type bins the counts are padded to.
pub const GINI_BINS: usize = 55;

/// Gini coefficient of the type counts.
///
/// Counts are padded with zeros to [`GINI_BINS`] bins and sorted descending.
/// The score is the normalized gap between the area under the cumulative
/// count curve and the area under the line of perfect equality. 1 when fewer
/// than two types are present.
///
/// A histogram spread evenly over all 55 bins scores 0. Because of the
/// padding, an even spread over fewer types is still measured against 55
/// bins and scores `(55 - k) / 55` for `k` types.
pub struct GiniCoefficientStrategy;

impl PurityScoringStrategy for GiniCoefficientStrategy {
    fn name(&self) -> &str {
        "gini"
    }

    fn score(&self, histogram: &TypeHistogram<'_>) -> f64 {
        if histogram.len() < 2 {
            return 1.0;
        }

        let mut values: Vec<u64> = histogram.counts().collect();
        if values.len() < GINI_BINS {
            values.resize(GINI_BINS, 0);
        }
        values.sort_unstable_by(|a, b| b.cmp(a));

        let mut height = 0.0;
        let mut area = 0.0;
        for &v in &values {
            let v = v as f64;
            height += v;
            area += height - v / 2.0;
        }
        let fair_area = height * values.len() as f64 / 2.0;
        ((fair_area - area) / fair_area).abs()
    }
}
