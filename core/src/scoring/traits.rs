use super::histogram::TypeHistogram;

/// Purity scoring strategy plugin.
///
/// A strategy maps the type histogram of a category's aggregated articles to
/// a scalar; the scheduler classifies the category as pure when the score is
/// strictly greater than the configured threshold. Implementations must be
/// pure functions of the histogram: they are called concurrently from every
/// worker.
pub trait PurityScoringStrategy: Send + Sync {
    /// Display name, also used to name output files.
    fn name(&self) -> &str;

    fn score(&self, histogram: &TypeHistogram<'_>) -> f64;
}
