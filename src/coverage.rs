//! Statement coverage of the combined profile, threshold enforcement and reporting.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{error, info};

use crate::config::RunSettings;
use crate::error::{GocoverdirError, Result};
use crate::profile::{Profile, ProfileParser};

/// Slack applied before declaring coverage below the required threshold.
pub const THRESHOLD_EPSILON: f64 = 0.001;

/// File name of the HTML report inside the OS temp directory.
pub const HTML_REPORT_NAME: &str = "cover.html";

/// Covered statements as a percentage of all statements.
///
/// Returns exactly `0.0` when there are no statements at all.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn coverage_percent(profiles: &[Profile]) -> f64 {
    let total: u64 = profiles.iter().map(Profile::total_statements).sum();
    if total == 0 {
        return 0.0;
    }
    let covered: u64 = profiles.iter().map(Profile::covered_statements).sum();
    covered as f64 / total as f64 * 100.0
}

/// Parse the profile at `path` and compute its coverage percentage.
///
/// # Errors
/// Returns an error if the profile cannot be read or parsed.
pub fn calculate_coverage(path: &Path) -> Result<f64> {
    let profiles = ProfileParser::new().parse_file(path)?;
    Ok(coverage_percent(&profiles))
}

/// Fail when `coverage` is below a positive `required` threshold.
///
/// # Errors
/// Returns `CoverageBelowThreshold` when `coverage < required - THRESHOLD_EPSILON`.
pub fn check_threshold(coverage: f64, required: f64, profile: &Path) -> Result<()> {
    if required > 0.0 && coverage < required - THRESHOLD_EPSILON {
        return Err(GocoverdirError::CoverageBelowThreshold {
            coverage,
            required,
            profile: profile.to_path_buf(),
        });
    }
    Ok(())
}

#[must_use]
pub fn format_coverage_line(coverage: f64) -> String {
    format!("coverage: {coverage:.1}% of statements")
}

#[must_use]
pub fn html_report_path() -> PathBuf {
    std::env::temp_dir().join(HTML_REPORT_NAME)
}

/// Render `profile` as HTML with `<program> tool cover`.
///
/// # Errors
/// Returns an error if the tool cannot be started or exits unsuccessfully.
pub fn generate_html(program: &str, profile: &Path, output: &Path) -> Result<()> {
    info!(
        "Generating coverage HTML at {} or file://{}",
        output.display(),
        output.display()
    );

    let result = Command::new(program)
        .args(["tool", "cover", "-html"])
        .arg(profile)
        .arg("-o")
        .arg(output)
        .output()
        .map_err(|source| GocoverdirError::ReportSpawn {
            program: program.to_string(),
            source,
        })?;

    if result.status.success() {
        Ok(())
    } else {
        error!("{}", String::from_utf8_lossy(&result.stderr).trim_end());
        Err(GocoverdirError::ReportFailed {
            program: program.to_string(),
            status: result.status,
        })
    }
}

/// Post-merge reporting: HTML first, then the printed percentage and the threshold.
///
/// The profile is only parsed when the percentage is printed or enforced.
///
/// # Errors
/// Returns an error if HTML generation fails, the profile cannot be parsed, or
/// coverage is below the required threshold.
pub fn report(settings: &RunSettings, out: &mut dyn Write) -> Result<()> {
    if settings.html_coverage {
        generate_html(&settings.program, &settings.coverprofile, &html_report_path())?;
    }

    if !settings.wants_coverage() {
        return Ok(());
    }

    let coverage = calculate_coverage(&settings.coverprofile)?;
    info!("Total coverage {coverage:.4}%");

    if settings.print_coverage {
        writeln!(out, "{}", format_coverage_line(coverage))?;
    }
    check_threshold(coverage, settings.required_coverage, &settings.coverprofile)
}

#[cfg(test)]
#[path = "coverage_tests.rs"]
mod tests;
