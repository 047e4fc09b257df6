use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::SinkError;

use super::record::PurityRecord;
use super::traits::ResultSink;

/// Target name that writes to standard output instead of a file.
pub const STDOUT_TARGET: &str = "stdout:";

type Writer = BufWriter<Box<dyn Write + Send>>;

/// Newline-delimited JSON sink behind a single mutex.
pub struct JsonlSink {
    target: String,
    writer: Mutex<Option<Writer>>,
}

impl JsonlSink {
    /// Create (or truncate) `path`, or write to stdout for `stdout:`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref();
        let target = path.to_string_lossy().to_string();
        let out: Box<dyn Write + Send> = if target == STDOUT_TARGET {
            Box::new(std::io::stdout())
        } else {
            Box::new(File::create(path)?)
        };
        Ok(Self::from_writer(target, out))
    }

    pub fn from_writer(target: impl Into<String>, out: Box<dyn Write + Send>) -> Self {
        Self {
            target: target.into(),
            writer: Mutex::new(Some(BufWriter::new(out))),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    fn lock(&self) -> MutexGuard<'_, Option<Writer>> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ResultSink for JsonlSink {
    fn name(&self) -> &str {
        "jsonl"
    }

    fn emit(&self, record: &PurityRecord) -> Result<(), SinkError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut guard = self.lock();
        let writer = guard.as_mut().ok_or(SinkError::Closed)?;
        writer.write_all(line.as_bytes())?;
        Ok(())
    }

    /// Flush and close. Later emits fail with [`SinkError::Closed`]; a second
    /// flush is a no-op.
    fn flush(&self) -> Result<(), SinkError> {
        let Some(mut writer) = self.lock().take() else {
            return Ok(());
        };
        writer.flush()?;
        tracing::debug!(output = %self.target, "result sink flushed");
        Ok(())
    }
}
