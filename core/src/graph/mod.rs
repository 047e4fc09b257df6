//! Frozen category DAG.
//!
//! Construction happens in [`GraphBuilder`] (get-or-create by name, edges,
//! article tags, article types). [`GraphBuilder::freeze`] assigns dense ids,
//! rejects cycles, and yields an immutable [`CategoryGraph`] that the
//! scheduler shares read-only between workers.

mod builder;
mod model;
mod relabel;

pub use builder::GraphBuilder;
pub use model::{Article, Category, CategoryGraph};

/// Dense 0-based category index, valid within one graph instance.
pub type CategoryId = u32;

/// Dense 0-based article index, valid within one graph instance.
pub type ArticleId = u32;

/// Index into the interned article type labels of a graph.
pub type TypeId = u32;
