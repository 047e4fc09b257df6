use crate::error::SinkError;

use super::record::PurityRecord;

/// Destination for pure-category records.
///
/// Workers call [`emit`](ResultSink::emit) concurrently; implementations must
/// never interleave two records. [`flush`](ResultSink::flush) is called once,
/// after the worker pool drained.
pub trait ResultSink: Send + Sync {
    fn name(&self) -> &str;

    fn emit(&self, record: &PurityRecord) -> Result<(), SinkError>;

    fn flush(&self) -> Result<(), SinkError>;
}
