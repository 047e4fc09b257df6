pub mod factory;
pub mod scoring;

pub use factory::{build_strategy, STRATEGY_NAMES};
