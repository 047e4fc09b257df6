mod load;
mod types;

pub use load::{apply_env_overrides, get_data_dir, load_default, load_file, load_from_str};
pub use types::{LoggingConfig, OutputConfig, PruneConfig, SchedulerConfig};
