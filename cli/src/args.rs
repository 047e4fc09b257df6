use std::path::PathBuf;

use clap::builder::PossibleValuesParser;
use clap::Parser;

/// Classify every category of a category DAG as pure or impure and write the
/// pure ones, with their aggregated articles, as JSON lines.
#[derive(Parser, Debug, Clone)]
#[command(name = "wcnprune", version)]
pub struct Args {
    /// Category edges, one `child<TAB>parent` per line.
    pub edges: PathBuf,

    /// Article memberships, one `id<TAB>title<TAB>category` per line.
    pub articles: PathBuf,

    /// Article types, one `id<TAB>type` per line.
    pub types: PathBuf,

    #[arg(
        long,
        default_value = "gini",
        value_parser = PossibleValuesParser::new(wcnprune_plugins::STRATEGY_NAMES.iter().copied())
    )]
    pub strategy: String,

    /// Purity threshold; a category is pure when its score is strictly
    /// greater. Repeat to run several thresholds over the same graph.
    #[arg(long = "threshold", value_parser = parse_threshold, default_values_t = [0.966])]
    pub thresholds: Vec<f64>,

    /// Worker threads (default: config, else one per cpu).
    #[arg(long, value_parser = parse_positive)]
    pub workers: Option<usize>,

    /// Explicit-set size above which a mailbox switches to a bit-vector.
    #[arg(long, value_parser = parse_positive)]
    pub set_capacity: Option<usize>,

    #[arg(long)]
    pub output_dir: Option<String>,

    /// Config file to use instead of the default lookup.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Draw a progress bar on stderr.
    #[arg(long)]
    pub progress: bool,
}

fn parse_threshold(s: &str) -> Result<f64, String> {
    let v: f64 = s.trim().parse().map_err(|e| format!("{e}"))?;
    if v.is_nan() {
        return Err("threshold must be a number".to_string());
    }
    Ok(v)
}

fn parse_positive(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(v) => Ok(v),
        Err(e) => Err(e.to_string()),
    }
}
