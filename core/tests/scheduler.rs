mod common;

use std::collections::HashMap;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use wcnprune_core::mailbox::DEFAULT_SET_CAPACITY;
use wcnprune_core::{GraphBuilder, GraphError, MemorySink, PruneError, Purity};

use common::{
    build_graph, layered_graph, run_pruner, run_pruner_with_capacity, sorted_records, AcceptAll,
    DominantShare, FailingSink,
};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn single_edge_propagates_leaf_articles_to_root() {
    let graph = build_graph(&[("A", "root")], &[(1, "A")], &[(1, "typeX")]);
    let sink = Arc::new(MemorySink::new());

    let report = run_pruner(graph.clone(), Arc::new(AcceptAll), 0.0, 2, sink.clone())
        .await
        .expect("run");

    assert_eq!(report.summary.pure, 2);
    assert_eq!(report.summary.impure, 0);
    assert_eq!(report.pure_names(&graph), vec!["A", "root"]);
    assert_eq!(sink.record_for("A").expect("A").articles, vec![1]);
    assert_eq!(sink.record_for("root").expect("root").articles, vec![1]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn every_category_is_evaluated_once_after_its_children() {
    let graph = layered_graph(6, 24, 3);
    let sink = Arc::new(MemorySink::new());

    let report = run_pruner(graph.clone(), Arc::new(AcceptAll), 0.5, 6, sink.clone())
        .await
        .expect("run");

    // accept-all: every category is pure and emits exactly one record
    let records = sink.records();
    assert_eq!(records.len(), graph.category_count());
    assert_eq!(report.summary.pure, graph.category_count());

    // a child's record is written before its parent is dequeued
    let position: HashMap<&str, usize> = records
        .iter()
        .enumerate()
        .map(|(i, r)| (r.category.as_str(), i))
        .collect();
    assert_eq!(position.len(), records.len(), "category emitted twice");
    for category in graph.categories() {
        for &child in &category.children {
            let child = graph.category(child).expect("child");
            assert!(
                position[child.name.as_str()] < position[category.name.as_str()],
                "{} emitted before its child {}",
                category.name,
                child.name
            );
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn impure_children_contribute_nothing() {
    let graph = build_graph(
        &[("P", "root"), ("M", "root")],
        &[(1, "P"), (2, "P"), (3, "M"), (4, "M")],
        &[(1, "Person"), (2, "Person"), (3, "Person"), (4, "Place")],
    );
    let sink = Arc::new(MemorySink::new());

    let report = run_pruner(graph.clone(), Arc::new(DominantShare), 0.9, 3, sink.clone())
        .await
        .expect("run");

    let m = graph.category_id("M").expect("M");
    assert_eq!(report.purity_of(m), Purity::Impure);
    assert!(sink.record_for("M").is_none());

    let root = sink.record_for("root").expect("root is pure");
    assert_eq!(root.articles, vec![1, 2]);
    assert_eq!(root.score, 1.0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn impure_category_does_not_hide_ids_reaching_ancestors_another_way() {
    // A feeds D twice: through impure B and through pure C
    let graph = build_graph(
        &[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")],
        &[(1, "A"), (2, "B"), (5, "D")],
        &[(1, "Person"), (2, "Place"), (5, "Person")],
    );
    let sink = Arc::new(MemorySink::new());

    let report = run_pruner(graph.clone(), Arc::new(DominantShare), 0.9, 4, sink.clone())
        .await
        .expect("run");

    let b = graph.category_id("B").expect("B");
    assert_eq!(report.purity_of(b), Purity::Impure);
    assert!(sink.record_for("B").is_none());
    assert_eq!(sink.record_for("C").expect("C").articles, vec![1]);
    assert_eq!(sink.record_for("D").expect("D").articles, vec![1, 5]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn local_articles_survive_an_impure_child_holding_them() {
    // article 1 is tagged to both the impure child X and its parent P
    let graph = build_graph(
        &[("X", "P")],
        &[(1, "X"), (2, "X"), (1, "P"), (3, "P")],
        &[(1, "Person"), (2, "Place"), (3, "Person")],
    );
    let sink = Arc::new(MemorySink::new());

    let report = run_pruner(graph.clone(), Arc::new(DominantShare), 0.9, 2, sink.clone())
        .await
        .expect("run");

    let x = graph.category_id("X").expect("X");
    assert_eq!(report.purity_of(x), Purity::Impure);
    let parent = sink.record_for("P").expect("P is pure");
    assert_eq!(parent.articles, vec![1, 3]);
    assert_eq!(parent.score, 1.0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn purity_is_not_inherited_from_pure_children() {
    let graph = build_graph(
        &[("People", "Mixed"), ("Places", "Mixed")],
        &[(1, "People"), (2, "Places")],
        &[(1, "Person"), (2, "Place")],
    );
    let sink = Arc::new(MemorySink::new());

    let report = run_pruner(graph.clone(), Arc::new(DominantShare), 0.9, 2, sink.clone())
        .await
        .expect("run");

    let mixed = graph.category_id("Mixed").expect("Mixed");
    assert_eq!(report.pure_names(&graph), vec!["People", "Places"]);
    assert_eq!(report.purity_of(mixed), Purity::Impure);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn diamond_counts_shared_descendant_articles_once() {
    let graph = build_graph(
        &[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")],
        &[(7, "A"), (8, "B")],
        &[(7, "Person"), (8, "Person")],
    );
    let sink = Arc::new(MemorySink::new());

    run_pruner(graph, Arc::new(AcceptAll), 0.5, 4, sink.clone())
        .await
        .expect("run");

    assert_eq!(sink.record_for("D").expect("D").articles, vec![7, 8]);
    assert_eq!(sink.record_for("C").expect("C").articles, vec![7]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn untyped_articles_are_carried_but_not_scored() {
    let graph = build_graph(&[("A", "root")], &[(1, "A"), (2, "A")], &[(1, "Person")]);
    let sink = Arc::new(MemorySink::new());

    run_pruner(graph, Arc::new(DominantShare), 0.5, 2, sink.clone())
        .await
        .expect("run");

    // 1 of 1 typed article is a Person; the untyped one still rides along
    let root = sink.record_for("root").expect("root");
    assert_eq!(root.articles, vec![1, 2]);
    assert_eq!(root.score, 1.0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn category_without_typed_articles_scores_empty_histogram() {
    let graph = build_graph(&[], &[(1, "Lonely")], &[]);
    let sink = Arc::new(MemorySink::new());

    let report = run_pruner(graph, Arc::new(DominantShare), 0.0, 1, sink.clone())
        .await
        .expect("run");

    assert_eq!(report.summary.impure, 1);
    assert!(sink.records().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn results_do_not_depend_on_workers_or_set_capacity() {
    let graph = layered_graph(5, 32, 6);

    let mut baseline = None;
    for (workers, capacity) in [(1, usize::MAX), (8, 1), (3, 16), (8, DEFAULT_SET_CAPACITY)] {
        let sink = Arc::new(MemorySink::new());
        let report = run_pruner_with_capacity(
            graph.clone(),
            Arc::new(DominantShare),
            0.7,
            workers,
            sink.clone(),
            capacity,
        )
        .await
        .expect("run");
        let outcome = (report.purity.clone(), sorted_records(&sink));

        match &baseline {
            None => baseline = Some(outcome),
            Some(expected) => assert_eq!(
                &outcome, expected,
                "workers={workers} capacity={capacity} diverged"
            ),
        }
    }

    let (purity, records) = baseline.expect("baseline");
    assert!(purity.iter().all(|p| *p != Purity::Unknown));
    assert!(!records.is_empty());
    assert!(purity.iter().any(|p| *p == Purity::Impure));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn empty_graph_finishes_immediately() {
    let graph = build_graph(&[], &[], &[]);
    let sink = Arc::new(MemorySink::new());

    let report = run_pruner(graph, Arc::new(AcceptAll), 0.5, 4, sink.clone())
        .await
        .expect("run");

    assert_eq!(report.summary.total_categories, 0);
    assert_eq!(report.summary.pure + report.summary.impure, 0);
    assert!(sink.records().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn more_workers_than_categories() {
    let graph = build_graph(&[("A", "B"), ("B", "C")], &[(1, "A")], &[(1, "Person")]);
    let sink = Arc::new(MemorySink::new());

    let report = run_pruner(graph, Arc::new(AcceptAll), 0.5, 16, sink.clone())
        .await
        .expect("run");

    assert_eq!(report.summary.pure, 3);
    assert_eq!(sink.record_for("C").expect("C").articles, vec![1]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn failed_emits_are_counted_not_fatal() {
    let graph = build_graph(
        &[("A", "root"), ("B", "root")],
        &[(1, "A"), (2, "B")],
        &[(1, "X"), (2, "X")],
    );

    let sink = Arc::new(FailingSink);
    let report = run_pruner(graph.clone(), Arc::new(AcceptAll), 0.5, 2, sink)
        .await
        .expect("run survives sink failures");

    assert_eq!(report.summary.pure, 3);
    assert_eq!(report.summary.emit_failures, 3);
    let root = graph.category_id("root").expect("root");
    assert_eq!(report.purity_of(root), Purity::Pure);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn metrics_settle_after_run() {
    let graph = layered_graph(3, 8, 2);
    let pruner = wcnprune_core::PurityPruner::new(
        graph.clone(),
        Arc::new(AcceptAll),
        0.5,
        3,
        Arc::new(MemorySink::new()),
    );
    let metrics = pruner.metrics();

    pruner.run().await.expect("run");

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.processed, graph.category_count());
    assert_eq!(snapshot.remaining, 0);
    assert_eq!(snapshot.queued, 0);
}

#[tokio::test]
async fn zero_workers_is_rejected() {
    let graph = build_graph(&[("A", "B")], &[], &[]);
    let sink = Arc::new(MemorySink::new());
    let err = run_pruner(graph, Arc::new(AcceptAll), 0.5, 0, sink)
        .await
        .expect_err("zero workers");
    assert!(matches!(err, PruneError::InvalidOptions(_)));
}

#[tokio::test]
async fn nan_threshold_is_rejected() {
    let graph = build_graph(&[("A", "B")], &[], &[]);
    let sink = Arc::new(MemorySink::new());
    let err = run_pruner(graph, Arc::new(AcceptAll), f64::NAN, 1, sink)
        .await
        .expect_err("nan threshold");
    assert!(matches!(err, PruneError::InvalidOptions(_)));
}

#[test]
fn cyclic_input_is_rejected_before_scheduling() {
    let mut builder = GraphBuilder::new();
    builder.add_edge_named("A", "B");
    builder.add_edge_named("B", "C");
    builder.add_edge_named("C", "A");
    builder.add_edge_named("Leaf", "A");

    match builder.freeze() {
        Err(GraphError::Cycle { path }) => {
            assert_eq!(path.first(), path.last());
            assert_eq!(path.len(), 4);
        }
        Ok(_) => panic!("cycle not detected"),
    }
}
