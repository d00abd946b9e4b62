pub mod run;

pub use run::{apply_cli_overrides, execute, load_config, run, run_impl};
