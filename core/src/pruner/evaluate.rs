use crate::graph::CategoryGraph;
use crate::mailbox::{ArticleSet, Purity};
use crate::scoring::{PurityScoringStrategy, TypeHistogram};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub score: f64,
    pub purity: Purity,
}

/// Type histogram of an aggregate. Articles without a type are members of the
/// set but not counted.
pub fn histogram<'g>(graph: &'g CategoryGraph, articles: &ArticleSet) -> TypeHistogram<'g> {
    let mut histogram = TypeHistogram::new();
    for id in articles {
        if let Some(label) = graph.article_type(id) {
            histogram.record(label);
        }
    }
    histogram
}

/// Score an aggregate; pure iff `score > threshold`. A NaN score is impure.
pub fn evaluate(
    graph: &CategoryGraph,
    articles: &ArticleSet,
    strategy: &dyn PurityScoringStrategy,
    threshold: f64,
) -> Evaluation {
    let score = strategy.score(&histogram(graph, articles));
    let purity = if score > threshold {
        Purity::Pure
    } else {
        Purity::Impure
    };
    Evaluation { score, purity }
}
