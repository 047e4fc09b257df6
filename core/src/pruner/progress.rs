use indicatif::{ProgressBar, ProgressStyle};

use super::metrics::ProgressSnapshot;

/// Terminal progress bar for a pruning run
///
/// Fed from the periodic metrics snapshot; it never touches scheduler state.
pub struct ProgressMonitor {
    bar: ProgressBar,
    enabled: bool,
}

impl ProgressMonitor {
    /// Create a new progress monitor
    ///
    /// # Arguments
    ///
    /// * `total_categories` - Number of categories the run will evaluate
    /// * `enabled` - Whether to draw anything (disabled for piped output)
    pub fn new(total_categories: usize, enabled: bool) -> Self {
        if !enabled {
            return Self {
                bar: ProgressBar::hidden(),
                enabled: false,
            };
        }

        let bar = ProgressBar::new(total_categories as u64);
        let style = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} categories ({percent}%) {msg}")
            .map(|s| s.progress_chars("█▓▒░  "))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        bar.set_message("starting...");

        Self { bar, enabled: true }
    }

    pub fn update(&self, snapshot: &ProgressSnapshot) {
        if !self.enabled {
            return;
        }
        self.bar.set_position(snapshot.processed as u64);
        self.bar.set_message(format!(
            "queue {} | pure {} | impure {}",
            snapshot.queued, snapshot.pure, snapshot.impure
        ));
    }

    pub fn finish(&self) {
        if self.enabled {
            self.bar.finish_and_clear();
        }
    }
}

impl Drop for ProgressMonitor {
    fn drop(&mut self) {
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(processed: usize) -> ProgressSnapshot {
        ProgressSnapshot {
            queued: 2,
            processed,
            remaining: 10 - processed,
            pure: processed,
            impure: 0,
            emit_failures: 0,
        }
    }

    #[test]
    fn test_progress_monitor_disabled() {
        let monitor = ProgressMonitor::new(10, false);

        // Should not panic when disabled
        monitor.update(&snapshot(3));
        monitor.finish();
    }

    #[test]
    fn test_progress_monitor_enabled() {
        let monitor = ProgressMonitor::new(10, true);
        monitor.update(&snapshot(4));
        monitor.update(&snapshot(10));
        monitor.finish();
    }
}
