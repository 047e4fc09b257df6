use std::sync::{Mutex, PoisonError};

use crate::error::SinkError;

use super::record::PurityRecord;
use super::traits::ResultSink;

/// Collects records in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<PurityRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records emitted so far, in emission order.
    pub fn records(&self) -> Vec<PurityRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn record_for(&self, category: &str) -> Option<PurityRecord> {
        self.records().into_iter().find(|r| r.category == category)
    }
}

impl ResultSink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    fn emit(&self, record: &PurityRecord) -> Result<(), SinkError> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }

    fn flush(&self) -> Result<(), SinkError> {
        Ok(())
    }
}
