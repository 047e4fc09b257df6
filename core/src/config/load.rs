use std::path::{Path, PathBuf};

use super::types::PruneConfig;

/// Get the default data directory: ~/.wcnprune
pub fn get_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".wcnprune"))
}

pub fn load_from_str(s: &str) -> anyhow::Result<PruneConfig> {
    Ok(toml::from_str::<PruneConfig>(s)?)
}

pub fn load_default() -> anyhow::Result<PruneConfig> {
    // Priority 1: ~/.wcnprune/config.toml
    let user_config = get_data_dir()?.join("config.toml");

    // Priority 2: ./wcnprune.toml (current directory)
    let local_config = Path::new("wcnprune.toml");

    let mut cfg = if user_config.exists() {
        load_from_str(&std::fs::read_to_string(&user_config)?)?
    } else if local_config.exists() {
        load_from_str(&std::fs::read_to_string(local_config)?)?
    } else {
        PruneConfig::default()
    };

    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok())?;
    Ok(cfg)
}

/// Load an explicit config file, then apply environment overrides.
pub fn load_file(path: &Path) -> anyhow::Result<PruneConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read config {}: {e}", path.display()))?;
    let mut cfg = load_from_str(&content)?;
    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok())?;
    Ok(cfg)
}

/// Environment variable overrides (highest priority).
pub fn apply_env_overrides(
    cfg: &mut PruneConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("WCNPRUNE_WORKERS") {
        cfg.scheduler.workers = v
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("WCNPRUNE_WORKERS={v}: {e}"))?;
    }
    if let Some(v) = get("WCNPRUNE_SET_CAPACITY") {
        cfg.scheduler.set_capacity = v
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("WCNPRUNE_SET_CAPACITY={v}: {e}"))?;
    }
    if let Some(v) = get("WCNPRUNE_LOG_LEVEL") {
        cfg.logging.level = v;
    }
    if let Some(v) = get("WCNPRUNE_OUTPUT_DIR") {
        cfg.output.directory = v;
    }

    Ok(())
}
