use std::path::PathBuf;

use clap::Parser;

use crate::config::CoverMode;

#[derive(Parser, Debug)]
#[command(name = "gocoverdir")]
#[command(author, version, about = "Run go test -cover in every package below a directory")]
#[command(long_about = "Walks a source tree, runs `go test -cover` in every directory that \
    holds Go files, merges the per-directory profiles into one coverage profile and \
    optionally prints or enforces the total statement coverage.\n\n\
    Exit codes:\n  \
    0 - Success\n  \
    1 - Coverage below the required threshold\n  \
    2 - Configuration or runtime error")]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Directory to walk
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Skip loading configuration file
    #[arg(long)]
    pub no_config: bool,

    /// Coverage instrumentation mode passed to go test
    #[arg(long, value_enum)]
    pub covermode: Option<CoverMode>,

    /// CPU count passed to go test (-1 keeps the runner default)
    #[arg(long, allow_negative_numbers = true)]
    pub cpu: Option<i32>,

    /// Enable the race detector
    #[arg(long)]
    pub race: bool,

    /// Timeout for each go test invocation (e.g. 3s, 1m30s, 0 to disable)
    #[arg(long)]
    pub timeout: Option<String>,

    /// Path of the combined coverage profile
    #[arg(long)]
    pub coverprofile: Option<PathBuf>,

    /// Maximum recursion depth
    #[arg(long)]
    pub depth: Option<usize>,

    /// Colon-separated directory names to skip
    #[arg(long)]
    pub ignoredirs: Option<String>,

    /// Log destination: "-" for stderr, empty to buffer until failure, or a file path
    #[arg(long)]
    pub logfile: Option<String>,

    /// Print the total coverage percentage
    #[arg(long)]
    pub printcoverage: bool,

    /// Fail when total coverage is below this percentage (0-100)
    #[arg(long, allow_negative_numbers = true)]
    pub requiredcoverage: Option<f64>,

    /// Generate an HTML coverage report
    #[arg(long)]
    pub htmlcoverage: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
