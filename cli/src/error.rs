use thiserror::Error;

use wcnprune_core::{ImportError, PruneError, SinkError};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),

    #[error("import failed: {0}")]
    Import(#[from] ImportError),

    #[error("pruning failed: {0}")]
    Prune(#[from] PruneError),

    #[error("cannot open output: {0}")]
    Output(#[from] SinkError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl CliError {
    // 0: success
    // 2: usage (clap)
    // 11: config error
    // 20: input / output IO
    // 30: pruning run failed
    // 50: internal/uncategorized
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 11,
            CliError::Import(_) => 20,
            CliError::Output(_) => 20,
            CliError::Io(_) => 20,
            CliError::Prune(_) => 30,
            CliError::Anyhow(_) => 50,
        }
    }
}
