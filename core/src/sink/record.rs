use serde::{Deserialize, Serialize};

/// One output line: a pure category, the original ids of every article in
/// its aggregate (ascending), and its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurityRecord {
    pub category: String,
    pub articles: Vec<u64>,
    pub score: f64,
}
