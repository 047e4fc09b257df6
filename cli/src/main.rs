use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use wcnprune_cli::{app, args::Args, error::CliError};
use wcnprune_core::config::{self, LoggingConfig};

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            e.exit_code()
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, CliError> {
    let args = Args::parse();
    let cfg = match &args.config {
        Some(path) => config::load_file(path),
        None => config::load_default(),
    }
    .map_err(|e| CliError::Config(e.to_string()))?;
    init_tracing(&cfg.logging).map_err(CliError::Config)?;

    app::run_app(args, cfg).await?;
    Ok(0)
}

/// Install the subscriber described by `[logging]`. `RUST_LOG` wins over
/// the configured level.
fn init_tracing(logging: &LoggingConfig) -> Result<(), String> {
    if !logging.is_active() {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.filter_directive())
            .map_err(|e| format!("invalid log level '{}': {e}", logging.level))?,
    };

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
            .with_target(false)
    });

    let file_layer = if logging.file {
        let writer = log_file_writer(logging)?;
        Some(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_thread_names(true),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}

fn log_file_writer(
    logging: &LoggingConfig,
) -> Result<tracing_appender::non_blocking::NonBlocking, String> {
    let dir = logging.log_directory();
    let dir = std::path::PathBuf::from(shellexpand::tilde(&dir.to_string_lossy()).as_ref());
    std::fs::create_dir_all(&dir)
        .map_err(|e| format!("cannot create log directory {}: {e}", dir.display()))?;

    let name = logging.log_file_name(chrono::Local::now(), std::process::id());
    let appender = tracing_appender::rolling::never(dir, name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(guard);
    Ok(writer)
}
