use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::error::PruneError;
use crate::graph::CategoryGraph;
use crate::mailbox::Mailbox;
use crate::scoring::PurityScoringStrategy;
use crate::sink::ResultSink;

use super::metrics::PruneMetrics;
use super::progress::ProgressMonitor;
use super::types::{PruneReport, PruneSummary, PrunerOptions};
use super::worker::Shared;

/// Bottom-up purity classifier over a frozen category graph.
pub struct PurityPruner {
    graph: Arc<CategoryGraph>,
    strategy: Arc<dyn PurityScoringStrategy>,
    threshold: f64,
    workers: usize,
    sink: Arc<dyn ResultSink>,
    options: PrunerOptions,
    metrics: Arc<PruneMetrics>,
}

impl PurityPruner {
    pub fn new(
        graph: Arc<CategoryGraph>,
        strategy: Arc<dyn PurityScoringStrategy>,
        threshold: f64,
        workers: usize,
        sink: Arc<dyn ResultSink>,
    ) -> Self {
        let metrics = Arc::new(PruneMetrics::new(graph.category_count()));
        Self {
            graph,
            strategy,
            threshold,
            workers,
            sink,
            options: PrunerOptions::default(),
            metrics,
        }
    }

    pub fn with_options(mut self, options: PrunerOptions) -> Self {
        self.options = options;
        self
    }

    /// Handle for polling progress while [`run`](Self::run) is in flight.
    pub fn metrics(&self) -> Arc<PruneMetrics> {
        self.metrics.clone()
    }

    fn validate(&self) -> Result<(), PruneError> {
        if self.workers == 0 {
            return Err(PruneError::InvalidOptions(
                "worker count must be at least 1".to_string(),
            ));
        }
        if self.threshold.is_nan() {
            return Err(PruneError::InvalidOptions(
                "threshold must be a number".to_string(),
            ));
        }
        if self.options.progress_interval.is_zero() {
            return Err(PruneError::InvalidOptions(
                "progress interval must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Evaluate every category exactly once, children before parents, and
    /// flush the sink.
    ///
    /// Leaves are queued up front; `workers` blocking workers drain the ready
    /// queue until every category has been claimed.
    pub async fn run(self) -> Result<PruneReport, PruneError> {
        self.validate()?;

        let run_id = Uuid::new_v4().to_string();
        let started_at = Local::now();
        let start = Instant::now();
        let total = self.graph.category_count();
        let strategy_name = self.strategy.name().to_string();

        tracing::info!(
            run_id = %run_id,
            strategy = %strategy_name,
            threshold = self.threshold,
            workers = self.workers,
            categories = total,
            articles = self.graph.article_count(),
            "pruning started"
        );

        let shared = Arc::new(Shared::new(
            self.graph.clone(),
            self.strategy.clone(),
            self.threshold,
            self.sink.clone(),
            self.metrics.clone(),
            self.options.set_capacity,
            self.workers,
        ));

        let mut seeded = 0usize;
        for leaf in self.graph.leaves() {
            shared.enqueue(leaf)?;
            seeded += 1;
        }
        tracing::debug!(seeded, "leaf categories queued");

        let reporter =
            spawn_progress_reporter(self.metrics.clone(), &self.options, self.threshold);

        let handles: Vec<_> = (0..self.workers)
            .map(|worker| {
                let shared = shared.clone();
                tokio::task::spawn_blocking(move || shared.run_worker(worker))
            })
            .collect();

        let mut failure: Option<PruneError> = None;
        for handle in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome.map(|_| ()),
                Err(join) => Err(PruneError::Worker(join.to_string())),
            };
            if let Err(e) = outcome {
                failure.get_or_insert(e);
            }
        }

        reporter.abort();

        if let Err(e) = self.sink.flush() {
            self.metrics.record_emit_failure();
            tracing::warn!(sink = self.sink.name(), error = %e, "failed to flush result sink");
        }

        if let Some(e) = failure {
            tracing::error!(run_id = %run_id, error = %e, "pruning failed");
            return Err(e);
        }

        let purity = shared.mailboxes.iter().map(Mailbox::purity).collect();
        let snapshot = self.metrics.snapshot();
        let summary = PruneSummary {
            run_id,
            strategy: strategy_name,
            threshold: self.threshold,
            workers: self.workers,
            total_categories: total,
            pure: snapshot.pure,
            impure: snapshot.impure,
            emit_failures: snapshot.emit_failures,
            duration_ms: start.elapsed().as_millis() as u64,
            started_at,
            finished_at: Local::now(),
        };

        tracing::info!(
            run_id = %summary.run_id,
            pure = summary.pure,
            impure = summary.impure,
            emit_failures = summary.emit_failures,
            duration_ms = summary.duration_ms,
            "pruning finished"
        );

        Ok(PruneReport { summary, purity })
    }
}

/// Periodic, purely observational snapshot logger. Aborted by the caller.
fn spawn_progress_reporter(
    metrics: Arc<PruneMetrics>,
    options: &PrunerOptions,
    threshold: f64,
) -> JoinHandle<()> {
    let period = options.progress_interval;
    let bar_enabled = options.progress_bar;

    tokio::spawn(async move {
        let monitor = ProgressMonitor::new(metrics.total(), bar_enabled);
        let mut ticker = tokio::time::interval(period);
        // first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let snapshot = metrics.snapshot();
            tracing::info!(
                threshold,
                queue = snapshot.queued,
                processed = snapshot.processed,
                missing = snapshot.remaining,
                "progress"
            );
            monitor.update(&snapshot);
        }
    })
}
