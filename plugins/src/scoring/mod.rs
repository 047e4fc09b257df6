//! Built-in purity scores. Each is a pure function of the type histogram.

mod accept_all;
mod gini_coefficient;
mod gini_impurity;
mod top_gap;

pub use accept_all::AcceptAllStrategy;
pub use gini_coefficient::{GiniCoefficientStrategy, GINI_BINS};
pub use gini_impurity::GiniImpurityStrategy;
pub use top_gap::TopGapStrategy;
