use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Coverage instrumentation mode handed to the test runner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CoverMode {
    /// Boolean hit per block
    #[default]
    Set,
    /// Exact execution count per block
    Count,
    /// Execution count, safe under concurrency
    Atomic,
}

impl CoverMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Set => "set",
            Self::Count => "count",
            Self::Atomic => "atomic",
        }
    }
}

impl fmt::Display for CoverMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root of the `.gocoverdir.toml` file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub runner: RunnerConfig,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub coverage: CoverageConfig,

    #[serde(default)]
    pub log: LogConfig,
}

/// How the test runner is invoked for each directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunnerConfig {
    #[serde(default)]
    pub covermode: CoverMode,

    /// CPU count override; negative means runner default.
    #[serde(default = "default_cpu")]
    pub cpu: i32,

    #[serde(default)]
    pub race: bool,

    /// Per-directory timeout as a duration string (`3s`, `1m30s`). `0` disables it.
    #[serde(default = "default_timeout")]
    pub timeout: String,

    /// Test runner executable.
    #[serde(default = "default_program")]
    pub program: String,

    /// Wrapper used instead of `program` when a `Godeps` directory exists in the root.
    #[serde(default = "default_godep_program")]
    pub godep_program: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            covermode: CoverMode::default(),
            cpu: default_cpu(),
            race: false,
            timeout: default_timeout(),
            program: default_program(),
            godep_program: default_godep_program(),
        }
    }
}

/// Directory traversal policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanConfig {
    /// Maximum recursion depth (root is depth 0).
    #[serde(default = "default_depth")]
    pub depth: usize,

    /// Directory basenames that are never entered.
    #[serde(default = "default_ignore_dirs")]
    pub ignore_dirs: Vec<String>,

    /// Extensions marking a directory as test-eligible.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            depth: default_depth(),
            ignore_dirs: default_ignore_dirs(),
            extensions: default_extensions(),
        }
    }
}

/// Combined profile output and coverage reporting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoverageConfig {
    /// Combined profile path. Defaults to `coverage.out` in the OS temp directory.
    #[serde(default)]
    pub profile: Option<PathBuf>,

    /// Print the computed percentage to stdout.
    #[serde(default)]
    pub print: bool,

    /// Fail when coverage is below this percentage (0 disables the check).
    #[serde(default)]
    pub required: f64,

    /// Generate an HTML report next to the OS temp directory.
    #[serde(default)]
    pub html: bool,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            profile: None,
            print: false,
            required: 0.0,
            html: false,
        }
    }
}

/// Log destination.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    /// `-` for stderr, empty for silent-unless-failure, otherwise a file path.
    #[serde(default = "default_log_file")]
    pub file: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
        }
    }
}

const fn default_cpu() -> i32 {
    -1
}

fn default_timeout() -> String {
    "3s".to_string()
}

fn default_program() -> String {
    "go".to_string()
}

fn default_godep_program() -> String {
    "godep".to_string()
}

const fn default_depth() -> usize {
    10
}

fn default_ignore_dirs() -> Vec<String> {
    vec![".git".to_string(), "Godeps".to_string(), "vendor".to_string()]
}

fn default_extensions() -> Vec<String> {
    vec!["go".to_string()]
}

fn default_log_file() -> String {
    "-".to_string()
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
