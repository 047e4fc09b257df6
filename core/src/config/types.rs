use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::mailbox::DEFAULT_SET_CAPACITY;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PruneConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub scheduler: SchedulerConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// Bare level such as "info", applied to the wcnprune crates, or a full
    /// EnvFilter directive such as "warn,wcnprune_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}

/// Crates whose events a bare level such as `"debug"` applies to; everything
/// else stays at `warn`.
const LOG_TARGETS: [&str; 4] = ["wcnprune_core", "wcnprune_plugins", "wcnprune_cli", "wcnprune"];

impl LoggingConfig {
    /// Whether any subscriber layer should be installed.
    pub fn is_active(&self) -> bool {
        self.enabled && (self.console || self.file)
    }

    /// `EnvFilter` directive for `level`.
    ///
    /// A bare level is scoped to this workspace's crates. Anything containing
    /// a `=` or `,` is taken as a full directive.
    pub fn filter_directive(&self) -> String {
        let level = self.level.trim();
        if level.contains('=') || level.contains(',') {
            return level.to_string();
        }
        let level = if level.is_empty() { "info" } else { level };
        std::iter::once("warn".to_string())
            .chain(LOG_TARGETS.iter().map(|t| format!("{t}={level}")))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Configured log directory, or `<tmp>/wcnprune`.
    pub fn log_directory(&self) -> PathBuf {
        match self.directory.as_deref().map(str::trim) {
            Some(d) if !d.is_empty() => PathBuf::from(d),
            _ => std::env::temp_dir().join("wcnprune"),
        }
    }

    /// One file per invocation: `wcnprune-<local start time>-<pid>.log`.
    pub fn log_file_name(&self, started: chrono::DateTime<chrono::Local>, pid: u32) -> String {
        format!("wcnprune-{}-{pid}.log", started.format("%Y%m%d-%H%M%S"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Worker threads; 0 means one per logical cpu.
    #[serde(default)]
    pub workers: usize,

    /// Explicit-set cardinality above which a mailbox switches to a bit-vector.
    #[serde(default = "default_set_capacity")]
    pub set_capacity: usize,

    #[serde(default = "default_progress_interval_secs")]
    pub progress_interval_secs: u64,

    /// Draw a terminal progress bar in addition to the periodic log line.
    #[serde(default)]
    pub progress_bar: bool,
}

fn default_set_capacity() -> usize {
    DEFAULT_SET_CAPACITY
}

fn default_progress_interval_secs() -> u64 {
    20
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            set_capacity: default_set_capacity(),
            progress_interval_secs: default_progress_interval_secs(),
            progress_bar: false,
        }
    }
}

impl SchedulerConfig {
    pub fn effective_workers(&self) -> usize {
        if self.workers == 0 {
            num_cpus::get().max(1)
        } else {
            self.workers
        }
    }

    pub fn progress_interval(&self) -> Duration {
        Duration::from_secs(self.progress_interval_secs.max(1))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_directory")]
    pub directory: String,

    /// Output files are named `<strategy>_<threshold>_<file_suffix>`.
    #[serde(default = "default_file_suffix")]
    pub file_suffix: String,
}

fn default_output_directory() -> String {
    ".".to_string()
}

fn default_file_suffix() -> String {
    "articles_scores.json".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            file_suffix: default_file_suffix(),
        }
    }
}

impl OutputConfig {
    pub fn file_name(&self, strategy: &str, threshold: f64) -> String {
        format!("{strategy}_{threshold}_{}", self.file_suffix)
    }
}
