use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};

use crate::error::PruneError;
use crate::graph::{Category, CategoryGraph, CategoryId};
use crate::mailbox::{ArticleSet, Delivery, Mailbox, Purity};
use crate::scoring::PurityScoringStrategy;
use crate::sink::{PurityRecord, ResultSink};

use super::evaluate::evaluate;
use super::metrics::PruneMetrics;

/// `None` is a stop message pushed when the run is aborted.
type ReadyMessage = Option<CategoryId>;

/// State shared by every worker of one run.
pub(crate) struct Shared {
    pub(crate) graph: Arc<CategoryGraph>,
    pub(crate) strategy: Arc<dyn PurityScoringStrategy>,
    pub(crate) threshold: f64,
    pub(crate) sink: Arc<dyn ResultSink>,
    pub(crate) metrics: Arc<PruneMetrics>,
    pub(crate) mailboxes: Vec<Mailbox>,
    ready_tx: mpsc::UnboundedSender<ReadyMessage>,
    ready_rx: Mutex<mpsc::UnboundedReceiver<ReadyMessage>>,
    /// Categories claimed for processing; a worker stops once this passes
    /// the category count.
    claimed: AtomicUsize,
    aborted: AtomicBool,
    workers: usize,
}

impl Shared {
    pub(crate) fn new(
        graph: Arc<CategoryGraph>,
        strategy: Arc<dyn PurityScoringStrategy>,
        threshold: f64,
        sink: Arc<dyn ResultSink>,
        metrics: Arc<PruneMetrics>,
        set_capacity: usize,
        workers: usize,
    ) -> Self {
        let universe = graph.article_count();
        let mailboxes = graph
            .categories()
            .iter()
            .map(|c| Mailbox::new(c.children.len(), universe, set_capacity))
            .collect();
        let (ready_tx, ready_rx) = mpsc::unbounded_channel();

        Self {
            graph,
            strategy,
            threshold,
            sink,
            metrics,
            mailboxes,
            ready_tx,
            ready_rx: Mutex::new(ready_rx),
            claimed: AtomicUsize::new(0),
            aborted: AtomicBool::new(false),
            workers,
        }
    }

    pub(crate) fn enqueue(&self, category: CategoryId) -> Result<(), PruneError> {
        self.metrics.record_enqueued();
        self.ready_tx
            .send(Some(category))
            .map_err(|_| PruneError::Protocol("ready queue closed".to_string()))
    }

    /// Wake every worker and make them stop.
    pub(crate) fn abort(&self) {
        if self.aborted.swap(true, Ordering::AcqRel) {
            return;
        }
        tracing::warn!("aborting pruning run");
        for _ in 0..self.workers {
            let _ = self.ready_tx.send(None);
        }
    }

    /// Worker loop. Blocks the calling thread; run it on a blocking pool.
    ///
    /// Returns the number of categories this worker evaluated.
    pub(crate) fn run_worker(&self, worker: usize) -> Result<usize, PruneError> {
        let _guard = AbortOnPanic(self);
        let total = self.graph.category_count();
        let mut evaluated = 0usize;

        while self.claimed.fetch_add(1, Ordering::AcqRel) < total {
            let Some(category) = self.next_ready() else {
                break;
            };
            if let Err(e) = self.process(category) {
                self.abort();
                return Err(e);
            }
            evaluated += 1;
        }

        tracing::debug!(worker, evaluated, "worker finished");
        Ok(evaluated)
    }

    fn next_ready(&self) -> Option<CategoryId> {
        if self.aborted.load(Ordering::Acquire) {
            return None;
        }
        let message = self.ready_rx.blocking_lock().blocking_recv();
        match message {
            Some(Some(category)) => {
                self.metrics.record_dequeued();
                Some(category)
            }
            _ => None,
        }
    }

    fn process(&self, id: CategoryId) -> Result<(), PruneError> {
        let category = self
            .graph
            .category(id)
            .ok_or_else(|| PruneError::Protocol(format!("unknown category id {id}")))?;
        let mailbox = &self.mailboxes[id as usize];
        let mut articles = mailbox.take().ok_or_else(|| {
            PruneError::Protocol(format!("category '{}' dequeued twice", category.name))
        })?;
        articles.extend(category.articles.iter().copied());

        let evaluation = evaluate(
            &self.graph,
            &articles,
            self.strategy.as_ref(),
            self.threshold,
        );
        mailbox.set_purity(evaluation.purity);
        tracing::debug!(
            category = %category.name,
            articles = articles.len(),
            dense = articles.is_dense(),
            score = evaluation.score,
            purity = ?evaluation.purity,
            "category evaluated"
        );

        let withheld = ArticleSet::empty();
        let propagated = if evaluation.purity == Purity::Pure {
            self.emit(category, &articles, evaluation.score);
            &articles
        } else {
            articles.release();
            &withheld
        };

        for &parent in &category.parents {
            match self.mailboxes[parent as usize].deliver(id, propagated) {
                Delivery::Ready => self.enqueue(parent)?,
                Delivery::Pending { .. } => {}
                Delivery::Duplicate => {
                    tracing::warn!(category = %category.name, parent, "duplicate report ignored")
                }
                Delivery::Released => {
                    return Err(PruneError::Protocol(format!(
                        "category '{}' reported to parent {} after it was evaluated",
                        category.name, parent
                    )))
                }
            }
        }

        articles.release();
        self.metrics.record_done(evaluation.purity);
        Ok(())
    }

    /// Write one record. Failures are counted and logged, never propagated.
    fn emit(&self, category: &Category, aggregate: &ArticleSet, score: f64) {
        let mut articles: Vec<u64> = aggregate
            .iter()
            .filter_map(|id| self.graph.article(id))
            .map(|a| a.original_id)
            .collect();
        articles.sort_unstable();

        let record = PurityRecord {
            category: category.name.clone(),
            articles,
            score,
        };
        if let Err(e) = self.sink.emit(&record) {
            self.metrics.record_emit_failure();
            tracing::warn!(category = %category.name, error = %e, "failed to write result record");
        }
    }
}

struct AbortOnPanic<'a>(&'a Shared);

impl Drop for AbortOnPanic<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.abort();
        }
    }
}
