#![allow(dead_code)]

use std::sync::Arc;

use wcnprune_core::error::SinkError;
use wcnprune_core::{
    CategoryGraph, GraphBuilder, MemorySink, PruneError, PruneReport, PrunerOptions,
    PurityPruner, PurityRecord, PurityScoringStrategy, ResultSink, TypeHistogram,
};

/// Build a frozen graph from `(child, parent)` edges, `(article, category)`
/// memberships and `(article, type)` labels.
pub fn build_graph(
    edges: &[(&str, &str)],
    memberships: &[(u64, &str)],
    types: &[(u64, &str)],
) -> Arc<CategoryGraph> {
    let mut builder = GraphBuilder::new();
    for (child, parent) in edges {
        builder.add_edge_named(child, parent);
    }
    for (article, category) in memberships {
        let a = builder.get_or_create_article(*article, &format!("Article {article}"));
        let c = builder.get_or_create_category(category);
        builder.tag_article(a, c);
    }
    for (article, label) in types {
        builder.set_article_type(*article, label);
    }
    Arc::new(builder.freeze().expect("fixture graph must be acyclic"))
}

/// Layered DAG with `layers * width` categories. Every category has one or two
/// parents in the next layer; leaves carry `per_leaf` articles whose type
/// depends on the leaf's column block.
pub fn layered_graph(layers: usize, width: usize, per_leaf: u64) -> Arc<CategoryGraph> {
    let name = |layer: usize, col: usize| format!("L{layer}_{col}");
    let mut edges = Vec::new();
    for layer in 0..layers.saturating_sub(1) {
        for col in 0..width {
            edges.push((name(layer, col), name(layer + 1, col / 2)));
            if col % 3 == 0 {
                edges.push((name(layer, col), name(layer + 1, (col + 1) % width)));
            }
        }
    }

    let mut memberships = Vec::new();
    let mut types = Vec::new();
    let mut next = 1u64;
    for col in 0..width {
        for k in 0..per_leaf {
            memberships.push((next, name(0, col)));
            if k % 5 != 4 {
                types.push((next, format!("T{}", col / 4)));
            }
            next += 1;
        }
    }

    let edges: Vec<(&str, &str)> = edges.iter().map(|(c, p)| (c.as_str(), p.as_str())).collect();
    let memberships: Vec<(u64, &str)> = memberships.iter().map(|(a, c)| (*a, c.as_str())).collect();
    let types: Vec<(u64, &str)> = types.iter().map(|(a, t)| (*a, t.as_str())).collect();
    build_graph(&edges, &memberships, &types)
}

/// Always scores 1.
pub struct AcceptAll;

impl PurityScoringStrategy for AcceptAll {
    fn name(&self) -> &str {
        "accept_all"
    }

    fn score(&self, _histogram: &TypeHistogram<'_>) -> f64 {
        1.0
    }
}

/// Share of the most frequent type; 0 for an empty histogram.
pub struct DominantShare;

impl PurityScoringStrategy for DominantShare {
    fn name(&self) -> &str {
        "dominant_share"
    }

    fn score(&self, histogram: &TypeHistogram<'_>) -> f64 {
        let total = histogram.total();
        if total == 0 {
            return 0.0;
        }
        histogram.counts().max().unwrap_or(0) as f64 / total as f64
    }
}

/// Rejects every write.
pub struct FailingSink;

impl ResultSink for FailingSink {
    fn name(&self) -> &str {
        "failing"
    }

    fn emit(&self, _record: &PurityRecord) -> Result<(), SinkError> {
        Err(SinkError::Closed)
    }

    fn flush(&self) -> Result<(), SinkError> {
        Ok(())
    }
}

pub async fn run_pruner(
    graph: Arc<CategoryGraph>,
    strategy: Arc<dyn PurityScoringStrategy>,
    threshold: f64,
    workers: usize,
    sink: Arc<dyn ResultSink>,
) -> Result<PruneReport, PruneError> {
    PurityPruner::new(graph, strategy, threshold, workers, sink)
        .run()
        .await
}

pub async fn run_pruner_with_capacity(
    graph: Arc<CategoryGraph>,
    strategy: Arc<dyn PurityScoringStrategy>,
    threshold: f64,
    workers: usize,
    sink: Arc<dyn ResultSink>,
    set_capacity: usize,
) -> Result<PruneReport, PruneError> {
    let options = PrunerOptions {
        set_capacity,
        ..PrunerOptions::default()
    };
    PurityPruner::new(graph, strategy, threshold, workers, sink)
        .with_options(options)
        .run()
        .await
}

/// Records sorted by category name.
pub fn sorted_records(sink: &MemorySink) -> Vec<PurityRecord> {
    let mut records = sink.records();
    records.sort_by(|a, b| a.category.cmp(&b.category));
    records
}
