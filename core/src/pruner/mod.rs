//! Readiness-counting scheduler.
//!
//! # Protocol
//!
//! ```text
//! Pending ──(last child reports)──► Ready ──(dequeued)──► Processing ──► Done
//!    ▲                                                        │
//!    └──────── Mailbox::deliver(parent, propagated) ◄─────────┘
//! ```
//!
//! - Every category owns a [`Mailbox`](crate::mailbox::Mailbox) that counts
//!   distinct reporting children; the report that completes the count
//!   enqueues the category, exactly once.
//! - A worker takes the merged child articles, adds the local articles,
//!   scores the type histogram, and forwards either the whole aggregate
//!   (pure) or an empty set (impure) to each parent. An impure category
//!   only withholds its own aggregate; an ancestor still receives the same
//!   ids through a pure path or its own local articles.
//! - Workers stop once they have collectively claimed one slot per category,
//!   so termination does not depend on transient queue contents. Acyclicity
//!   (checked at freeze time) guarantees every claimed slot is eventually
//!   filled.

mod engine;
mod evaluate;
mod metrics;
mod progress;
mod types;
mod worker;

pub use engine::PurityPruner;
pub use evaluate::{evaluate, histogram, Evaluation};
pub use metrics::{ProgressSnapshot, PruneMetrics};
pub use progress::ProgressMonitor;
pub use types::{PruneReport, PruneSummary, PrunerOptions};
