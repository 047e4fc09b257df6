use std::time::Duration;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::config::SchedulerConfig;
use crate::graph::{CategoryGraph, CategoryId};
use crate::mailbox::{Purity, DEFAULT_SET_CAPACITY};

/// Tunables of a pruning run that do not change the classification.
#[derive(Debug, Clone)]
pub struct PrunerOptions {
    /// Explicit-set cardinality above which a mailbox switches to a bit-vector.
    pub set_capacity: usize,

    /// Period of the progress snapshot logger.
    pub progress_interval: Duration,

    /// Draw a terminal progress bar (disable for piped output).
    pub progress_bar: bool,
}

impl Default for PrunerOptions {
    fn default() -> Self {
        Self {
            set_capacity: DEFAULT_SET_CAPACITY,
            progress_interval: Duration::from_secs(20),
            progress_bar: false,
        }
    }
}

impl From<&SchedulerConfig> for PrunerOptions {
    fn from(cfg: &SchedulerConfig) -> Self {
        Self {
            set_capacity: cfg.set_capacity,
            progress_interval: cfg.progress_interval(),
            progress_bar: cfg.progress_bar,
        }
    }
}

/// Totals of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct PruneSummary {
    pub run_id: String,
    pub strategy: String,
    pub threshold: f64,
    pub workers: usize,
    pub total_categories: usize,
    pub pure: usize,
    pub impure: usize,
    /// Records that could not be written, plus a failed final flush.
    pub emit_failures: usize,
    pub duration_ms: u64,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
}

/// Summary plus the classification of every category, indexed by dense id.
#[derive(Debug, Clone)]
pub struct PruneReport {
    pub summary: PruneSummary,
    pub purity: Vec<Purity>,
}

impl PruneReport {
    pub fn purity_of(&self, id: CategoryId) -> Purity {
        self.purity
            .get(id as usize)
            .copied()
            .unwrap_or(Purity::Unknown)
    }

    /// Names of the pure categories, sorted.
    pub fn pure_names(&self, graph: &CategoryGraph) -> Vec<String> {
        let mut names: Vec<String> = graph
            .categories()
            .iter()
            .filter(|c| self.purity_of(c.id) == Purity::Pure)
            .map(|c| c.name.clone())
            .collect();
        names.sort();
        names
    }
}
