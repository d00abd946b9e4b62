//! Duration parsing for the `--timeout` flag.
//!
//! Accepts the same strings the Go toolchain does: a sequence of decimal numbers,
//! each with a unit suffix (`300ms`, `3s`, `1m30s`, `2h`), or a bare `0`.

use std::time::Duration;

use crate::{GocoverdirError, Result};

const NANOS_PER_MICRO: f64 = 1e3;
const NANOS_PER_MILLI: f64 = 1e6;
const NANOS_PER_SECOND: f64 = 1e9;
const NANOS_PER_MINUTE: f64 = 60.0 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: f64 = 60.0 * NANOS_PER_MINUTE;

/// Parse a Go-style duration string.
///
/// Negative durations are accepted and clamp to zero, which disables the timeout.
///
/// # Errors
/// Returns an error if the format is invalid.
///
/// # Examples
/// ```ignore
/// assert_eq!(parse_duration("3s").unwrap(), Duration::from_secs(3));
/// assert_eq!(parse_duration("1m30s").unwrap(), Duration::from_secs(90));
/// ```
pub fn parse_duration(input: &str) -> Result<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(GocoverdirError::Config(
            "Duration cannot be empty. Expected format: <number><unit> (e.g., 3s, 1m30s, 500ms)"
                .to_string(),
        ));
    }
    if let Some(magnitude) = input.strip_prefix('-') {
        if magnitude.starts_with(['-', '+']) {
            return Err(GocoverdirError::Config(format!(
                "Invalid duration format: '{input}'"
            )));
        }
        parse_duration(magnitude)?;
        return Ok(Duration::ZERO);
    }
    if input == "0" {
        return Ok(Duration::ZERO);
    }

    let mut rest = input.strip_prefix('+').unwrap_or(input);
    let mut total_nanos = 0.0_f64;

    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(|| {
                GocoverdirError::Config(format!(
                    "Invalid duration format: '{input}'. Missing unit. Expected format: <number><unit> (e.g., 3s, 1m30s)"
                ))
            })?;
        if number_end == 0 {
            return Err(GocoverdirError::Config(format!(
                "Invalid duration format: '{input}'. Missing number before unit"
            )));
        }

        let (number, after_number) = rest.split_at(number_end);
        let value: f64 = number.parse().map_err(|_| {
            GocoverdirError::Config(format!("Invalid duration number: '{number}'"))
        })?;

        let unit_end = after_number
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after_number.len());
        let (unit, remaining) = after_number.split_at(unit_end);

        let multiplier = match unit {
            "ns" => 1.0,
            "us" | "µs" | "μs" => NANOS_PER_MICRO,
            "ms" => NANOS_PER_MILLI,
            "s" => NANOS_PER_SECOND,
            "m" => NANOS_PER_MINUTE,
            "h" => NANOS_PER_HOUR,
            _ => {
                return Err(GocoverdirError::Config(format!(
                    "Invalid duration unit: '{unit}'. Supported units: ns, us, ms, s, m, h"
                )));
            }
        };

        total_nanos += value * multiplier;
        rest = remaining;
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(Duration::from_nanos(total_nanos.round() as u64))
}

/// Render a duration in a form accepted by `go test -timeout`.
#[must_use]
pub fn format_go_duration(duration: Duration) -> String {
    if duration.subsec_nanos() == 0 {
        format!("{}s", duration.as_secs())
    } else if duration.subsec_nanos() % 1_000_000 == 0 {
        format!("{}ms", duration.as_millis())
    } else {
        format!("{}ns", duration.as_nanos())
    }
}
