use thiserror::Error;

/// Structural problems found while freezing a category graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The edge set is not acyclic. `path` lists the category names along the
    /// cycle, starting and ending with the same name.
    #[error("cycle detected in category edges: {}", path.join(" -> "))]
    Cycle { path: Vec<String> },
}
