use std::path::PathBuf;

use thiserror::Error;

use super::graph::GraphError;
use crate::import::ImportSource;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("cannot open {kind} file {}: {source}", path.display())]
    Open {
        kind: ImportSource,
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("read failed in {kind} input after line {line}: {source}")]
    Read {
        kind: ImportSource,
        line: usize,
        source: std::io::Error,
    },
    #[error("graph rejected: {0}")]
    Graph(#[from] GraphError),
}

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("sink io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("record serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("sink already closed")]
    Closed,
}
