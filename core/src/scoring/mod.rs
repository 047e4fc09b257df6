mod histogram;
mod traits;

pub use histogram::TypeHistogram;
pub use traits::PurityScoringStrategy;
