use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GocoverdirError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Required coverage must be >= 0 && <= 100, but is {value}")]
    RequiredCoverageOutOfRange { value: f64 },

    #[error("Failed to read directory: {path}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create scratch directory")]
    ScratchDir {
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to start test runner '{program}'")]
    RunnerSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Tests failed in {directory}: {status}")]
    RunnerFailed { directory: PathBuf, status: ExitStatus },

    #[error("Invalid coverage profile {path} at line {line}: {message}")]
    ProfileParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error(
        "Code coverage {coverage:.4} less than required {required:.4}. \
         Run 'go tool cover -html {profile} -o cover.html' to inspect",
        profile = .profile.display()
    )]
    CoverageBelowThreshold {
        coverage: f64,
        required: f64,
        profile: PathBuf,
    },

    #[error("Failed to start report generator '{program}'")]
    ReportSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTML report generation failed: {status}")]
    ReportFailed { program: String, status: ExitStatus },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl GocoverdirError {
    /// Short category name used when reporting the error.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) | Self::RequiredCoverageOutOfRange { .. } | Self::TomlParse(_) => {
                "Config"
            }
            Self::DirectoryRead { .. }
            | Self::ScratchDir { .. }
            | Self::FileRead { .. }
            | Self::FileWrite { .. } => "Filesystem",
            Self::RunnerSpawn { .. } | Self::RunnerFailed { .. } => "Invocation",
            Self::ProfileParse { .. } => "Profile",
            Self::CoverageBelowThreshold { .. } => "CoverageThreshold",
            Self::ReportSpawn { .. } | Self::ReportFailed { .. } => "Report",
            Self::Io(_) => "IO",
        }
    }

    /// Process exit code for a run that ended with this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::CoverageBelowThreshold { .. } => crate::EXIT_COVERAGE_BELOW_THRESHOLD,
            _ => crate::EXIT_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, GocoverdirError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
