//! Wiring: config overrides, import, then one pruning run per threshold.
use std::path::PathBuf;
use std::sync::Arc;

use wcnprune_core::config::PruneConfig;
use wcnprune_core::import::{import_graph, ImportPaths};
use wcnprune_core::{JsonlSink, PruneSummary, PrunerOptions, PurityPruner, ResultSink};
use wcnprune_plugins::build_strategy;

use crate::args::Args;
use crate::error::CliError;

/// Apply command line flags on top of the loaded config.
pub fn apply_args(cfg: &mut PruneConfig, args: &Args) {
    if let Some(workers) = args.workers {
        cfg.scheduler.workers = workers;
    }
    if let Some(capacity) = args.set_capacity {
        cfg.scheduler.set_capacity = capacity;
    }
    if let Some(dir) = &args.output_dir {
        cfg.output.directory = dir.clone();
    }
    if args.progress {
        cfg.scheduler.progress_bar = true;
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

#[tracing::instrument(name = "cli.run_app", skip_all)]
pub async fn run_app(args: Args, mut cfg: PruneConfig) -> Result<Vec<PruneSummary>, CliError> {
    apply_args(&mut cfg, &args);
    if cfg.scheduler.progress_bar && !atty::is(atty::Stream::Stderr) {
        tracing::debug!("stderr is not a terminal; progress bar disabled");
        cfg.scheduler.progress_bar = false;
    }

    let strategy = build_strategy(&args.strategy).map_err(|e| CliError::Config(e.to_string()))?;
    let workers = cfg.scheduler.effective_workers();
    let out_dir = expand(&cfg.output.directory);
    std::fs::create_dir_all(&out_dir)?;

    let paths = ImportPaths {
        edges: expand(&args.edges.to_string_lossy()),
        articles: expand(&args.articles.to_string_lossy()),
        types: expand(&args.types.to_string_lossy()),
    };
    let (graph, report) = tokio::task::spawn_blocking(move || import_graph(&paths))
        .await
        .map_err(|e| anyhow::anyhow!("import task failed: {e}"))??;
    if !report.is_clean() {
        tracing::warn!(
            malformed_lines = report.diagnostics.len(),
            ignored_categories = report.ignored_categories.len(),
            "input contained lines that were skipped"
        );
    }
    tracing::info!(
        categories = graph.category_count(),
        articles = graph.article_count(),
        types = graph.type_labels().len(),
        "graph ready"
    );
    let graph = Arc::new(graph);

    let mut summaries = Vec::with_capacity(args.thresholds.len());
    for &threshold in &args.thresholds {
        let path = out_dir.join(cfg.output.file_name(strategy.name(), threshold));
        let sink = Arc::new(JsonlSink::create(&path)?);
        let output: Arc<dyn ResultSink> = sink.clone();

        let report = PurityPruner::new(graph.clone(), strategy.clone(), threshold, workers, output)
            .with_options(PrunerOptions::from(&cfg.scheduler))
            .run()
            .await?;

        let s = &report.summary;
        println!(
            "{} threshold={} pure={} impure={} emit_failures={} duration_ms={} output={}",
            s.strategy,
            s.threshold,
            s.pure,
            s.impure,
            s.emit_failures,
            s.duration_ms,
            sink.target()
        );
        summaries.push(report.summary);
    }

    Ok(summaries)
}
