#[allow(clippy::module_inception)]
pub mod error;
pub mod graph;
pub mod pruner;

pub use error::{ImportError, SinkError};
pub use graph::GraphError;
pub use pruner::PruneError;
