mod loader;
mod model;
mod settings;

pub use loader::{ConfigLoader, FileConfigLoader, FileSystem, LOCAL_CONFIG_NAME, RealFileSystem};
pub use model::{Config, CoverMode, CoverageConfig, LogConfig, RunnerConfig, ScanConfig};
pub use settings::{
    DEFAULT_PROFILE_NAME, RunSettings, default_coverprofile, split_ignore_dirs,
    validate_required_coverage,
};
