//! Purity classification of a category DAG.
//!
//! Categories are evaluated bottom-up: a category becomes ready once every
//! child has reported its propagated article ids, a worker scores the type
//! distribution of the aggregated articles, and the category either emits a
//! result record and forwards its articles to its parents (pure) or forwards
//! nothing (impure).
//!
//! ```text
//! import::import_graph() ──► CategoryGraph (frozen, dense ids, acyclic)
//!                                 │
//!                                 ▼
//!   PurityPruner::new(graph, strategy, threshold, workers, sink)
//!                                 │ run()
//!                                 ▼
//!   ready queue ◄── leaves      workers ──► Mailbox::deliver(parent) ──► ready queue
//!                                 │
//!                                 ▼
//!                        ResultSink (JSONL)
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod import;
pub mod mailbox;
pub mod pruner;
pub mod scoring;
pub mod sink;

pub use error::{GraphError, ImportError, PruneError, SinkError};
pub use graph::{Article, ArticleId, Category, CategoryGraph, CategoryId, GraphBuilder};
pub use mailbox::{ArticleSet, Purity};
pub use pruner::{PruneReport, PruneSummary, PrunerOptions, PurityPruner};
pub use scoring::{PurityScoringStrategy, TypeHistogram};
pub use sink::{JsonlSink, MemorySink, PurityRecord, ResultSink};
