//! Per-category aggregation state and the adaptive article-id set it holds.

mod article_set;
#[allow(clippy::module_inception)]
mod mailbox;

pub use article_set::{ArticleSet, Iter, DEFAULT_SET_CAPACITY};
pub use mailbox::{Delivery, Mailbox, Purity};
