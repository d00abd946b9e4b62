use std::path::PathBuf;

use super::*;

#[test]
fn error_display_config() {
    let err = GocoverdirError::Config("invalid covermode".to_string());
    assert_eq!(err.to_string(), "Configuration error: invalid covermode");
}

#[test]
fn error_display_required_coverage_out_of_range() {
    let err = GocoverdirError::RequiredCoverageOutOfRange { value: 101.5 };
    assert_eq!(
        err.to_string(),
        "Required coverage must be >= 0 && <= 100, but is 101.5"
    );
}

#[test]
fn error_display_directory_read() {
    let err = GocoverdirError::DirectoryRead {
        path: PathBuf::from("pkg/missing"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
    };
    assert!(err.to_string().contains("pkg/missing"));
}

#[test]
fn error_display_coverage_below_threshold() {
    let err = GocoverdirError::CoverageBelowThreshold {
        coverage: 79.0,
        required: 80.0,
        profile: PathBuf::from("coverage.out"),
    };
    let message = err.to_string();
    assert!(message.contains("79.0000"));
    assert!(message.contains("80.0000"));
    assert!(message.contains("coverage.out"));
}

#[test]
fn error_display_profile_parse() {
    let err = GocoverdirError::ProfileParse {
        path: PathBuf::from("coverage.out"),
        line: 3,
        message: "bad block".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Invalid coverage profile coverage.out at line 3: bad block"
    );
}

#[test]
fn error_type_returns_correct_type() {
    assert_eq!(
        GocoverdirError::Config("test".to_string()).error_type(),
        "Config"
    );
    assert_eq!(
        GocoverdirError::RequiredCoverageOutOfRange { value: -1.0 }.error_type(),
        "Config"
    );
    assert_eq!(
        GocoverdirError::FileWrite {
            path: PathBuf::from("coverage.out"),
            source: std::io::Error::other("disk full"),
        }
        .error_type(),
        "Filesystem"
    );
    assert_eq!(
        GocoverdirError::RunnerSpawn {
            program: "go".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        }
        .error_type(),
        "Invocation"
    );
    assert_eq!(
        GocoverdirError::Io(std::io::Error::other("test")).error_type(),
        "IO"
    );
}

#[test]
fn threshold_failure_maps_to_its_own_exit_code() {
    let err = GocoverdirError::CoverageBelowThreshold {
        coverage: 10.0,
        required: 50.0,
        profile: PathBuf::from("coverage.out"),
    };
    assert_eq!(err.exit_code(), crate::EXIT_COVERAGE_BELOW_THRESHOLD);
}

#[test]
fn other_errors_map_to_generic_exit_code() {
    let err = GocoverdirError::ScratchDir {
        source: std::io::Error::other("no space"),
    };
    assert_eq!(err.exit_code(), crate::EXIT_ERROR);
    assert_eq!(
        GocoverdirError::Config("x".to_string()).exit_code(),
        crate::EXIT_ERROR
    );
}

#[cfg(unix)]
#[test]
fn runner_failure_display_includes_directory() {
    use std::os::unix::process::ExitStatusExt;

    let err = GocoverdirError::RunnerFailed {
        directory: PathBuf::from("./pkg/a"),
        status: ExitStatus::from_raw(1 << 8),
    };
    assert!(err.to_string().contains("./pkg/a"));
    assert_eq!(err.error_type(), "Invocation");
}
