//! TAB-separated importer producing a frozen [`CategoryGraph`](crate::graph::CategoryGraph).
//!
//! Malformed lines, unknown categories and unknown articles are collected in
//! an [`ImportReport`]; only I/O failures and a cyclic edge set abort.

mod loader;
mod parser;

pub use loader::{import_graph, load_articles, load_edges, load_types, ImportPaths, ImportReport};
pub use parser::{DiagnosticKind, ImportSource, LineDiagnostic};
