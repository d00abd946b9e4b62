use std::ffi::OsStr;
use std::path::PathBuf;
use std::time::Duration;

use indexmap::IndexSet;

use crate::duration::parse_duration;
use crate::error::{GocoverdirError, Result};

use super::{Config, CoverMode};

/// Name of the combined profile written when no path is configured.
pub const DEFAULT_PROFILE_NAME: &str = "coverage.out";

/// Validated, immutable settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub covermode: CoverMode,
    pub cpu: i32,
    pub race: bool,
    pub timeout: Duration,
    pub program: String,
    pub godep_program: String,
    pub max_depth: usize,
    pub ignored_dirs: IndexSet<String>,
    pub extensions: Vec<String>,
    pub coverprofile: PathBuf,
    pub print_coverage: bool,
    pub required_coverage: f64,
    pub html_coverage: bool,
}

impl RunSettings {
    /// Validate a loaded configuration and freeze it.
    ///
    /// # Errors
    /// Returns an error if the required coverage is outside `[0, 100]`, the timeout
    /// cannot be parsed, or no runner program is named.
    pub fn resolve(config: &Config) -> Result<Self> {
        validate_required_coverage(config.coverage.required)?;

        if config.runner.program.trim().is_empty() {
            return Err(GocoverdirError::Config(
                "runner.program cannot be empty".to_string(),
            ));
        }

        let timeout = parse_duration(&config.runner.timeout)?;

        let ignored_dirs = config
            .scan
            .ignore_dirs
            .iter()
            .filter(|name| !name.is_empty())
            .cloned()
            .collect();

        let extensions = config
            .scan
            .extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .collect();

        Ok(Self {
            covermode: config.runner.covermode,
            cpu: config.runner.cpu,
            race: config.runner.race,
            timeout,
            program: config.runner.program.clone(),
            godep_program: config.runner.godep_program.clone(),
            max_depth: config.scan.depth,
            ignored_dirs,
            extensions,
            coverprofile: config
                .coverage
                .profile
                .clone()
                .unwrap_or_else(default_coverprofile),
            print_coverage: config.coverage.print,
            required_coverage: config.coverage.required,
            html_coverage: config.coverage.html,
        })
    }

    /// Whether a directory with this basename is skipped during the walk.
    #[must_use]
    pub fn is_ignored(&self, name: &OsStr) -> bool {
        name.to_str()
            .is_some_and(|name| self.ignored_dirs.contains(name))
    }

    /// Whether the merged profile has to be parsed after the walk.
    #[must_use]
    pub fn wants_coverage(&self) -> bool {
        self.print_coverage || self.required_coverage > 0.0
    }
}

/// Reject thresholds outside `[0, 100]`.
///
/// # Errors
/// Returns `RequiredCoverageOutOfRange` for out-of-range or NaN values.
pub fn validate_required_coverage(value: f64) -> Result<()> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(GocoverdirError::RequiredCoverageOutOfRange { value })
    }
}

/// Split a colon-separated directory list, dropping empty segments.
#[must_use]
pub fn split_ignore_dirs(list: &str) -> Vec<String> {
    list.split(':')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

#[must_use]
pub fn default_coverprofile() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_PROFILE_NAME)
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
