use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;

use crate::mailbox::Purity;

/// Passive counters of a running pruner. Reading them never affects the run.
#[derive(Debug)]
pub struct PruneMetrics {
    total: usize,
    queued: AtomicUsize,
    processed: AtomicUsize,
    pure: AtomicUsize,
    impure: AtomicUsize,
    emit_failures: AtomicUsize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressSnapshot {
    pub queued: usize,
    pub processed: usize,
    pub remaining: usize,
    pub pure: usize,
    pub impure: usize,
    pub emit_failures: usize,
}

impl PruneMetrics {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            queued: AtomicUsize::new(0),
            processed: AtomicUsize::new(0),
            pure: AtomicUsize::new(0),
            impure: AtomicUsize::new(0),
            emit_failures: AtomicUsize::new(0),
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        let processed = self.processed.load(Ordering::Relaxed);
        ProgressSnapshot {
            queued: self.queued.load(Ordering::Relaxed),
            processed,
            remaining: self.total.saturating_sub(processed),
            pure: self.pure.load(Ordering::Relaxed),
            impure: self.impure.load(Ordering::Relaxed),
            emit_failures: self.emit_failures.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn record_enqueued(&self) {
        self.queued.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_dequeued(&self) {
        self.queued.fetch_sub(1, Ordering::Relaxed);
    }

    pub(crate) fn record_done(&self, purity: Purity) {
        match purity {
            Purity::Pure => self.pure.fetch_add(1, Ordering::Relaxed),
            Purity::Impure => self.impure.fetch_add(1, Ordering::Relaxed),
            Purity::Unknown => 0,
        };
        self.processed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_emit_failure(&self) {
        self.emit_failures.fetch_add(1, Ordering::Relaxed);
    }
}
