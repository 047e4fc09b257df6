use thiserror::Error;

/// Errors raised by the purity scheduler.
#[derive(Error, Debug)]
pub enum PruneError {
    #[error("invalid pruner options: {0}")]
    InvalidOptions(String),

    /// A report reached a mailbox that was already released, or a category
    /// was dequeued twice. Only possible if the graph invariants are broken.
    #[error("scheduling protocol violated: {0}")]
    Protocol(String),

    #[error("worker failed: {0}")]
    Worker(String),
}
