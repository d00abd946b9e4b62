//! Per-directory test-runner invocation.

use std::ffi::OsString;
use std::path::{Component, Path};
use std::process::Command;

use tracing::info;

use crate::config::RunSettings;
use crate::context::RunContext;
use crate::duration::format_go_duration;
use crate::error::{GocoverdirError, Result};

/// Directory whose presence in the walk root switches invocations to the godep wrapper.
pub const GODEP_MARKER: &str = "Godeps";

/// Runs the tests of a single directory with coverage enabled.
pub trait TestRunner {
    /// Test `directory`, leaving exactly one new profile in the scratch area on success.
    ///
    /// # Errors
    /// Returns an error if the runner cannot be started or exits unsuccessfully.
    fn run_on(&self, ctx: &RunContext, directory: &Path) -> Result<()>;
}

/// `go test -cover ...`, optionally through a dependency-manager wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoTestRunner {
    program: String,
    leading_args: Vec<String>,
}

impl GoTestRunner {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    /// Run `<wrapper> <go> test ...` instead of `<go> test ...`.
    #[must_use]
    pub fn wrapped(wrapper: impl Into<String>, program: impl Into<String>) -> Self {
        Self {
            program: wrapper.into(),
            leading_args: vec![program.into()],
        }
    }

    /// Pick the plain runner or the godep wrapper depending on the walk root.
    #[must_use]
    pub fn detect(settings: &RunSettings, root: &Path) -> Self {
        if root.join(GODEP_MARKER).is_dir() {
            info!("{GODEP_MARKER} directory found, running tests through {}", settings.godep_program);
            Self::wrapped(&settings.godep_program, &settings.program)
        } else {
            Self::new(&settings.program)
        }
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Full argument list for one invocation.
    #[must_use]
    pub fn args(
        &self,
        settings: &RunSettings,
        profile_name: &str,
        output_dir: &Path,
        directory: &Path,
    ) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.leading_args.iter().map(OsString::from).collect();
        args.extend(
            [
                "test",
                "-cover",
                "-covermode",
                settings.covermode.as_str(),
                "-coverprofile",
                profile_name,
                "-outputdir",
            ]
            .map(OsString::from),
        );
        args.push(output_dir.as_os_str().to_os_string());

        if !settings.timeout.is_zero() {
            args.push("-timeout".into());
            args.push(format_go_duration(settings.timeout).into());
        }
        if settings.cpu >= 0 {
            args.push("-cpu".into());
            args.push(settings.cpu.to_string().into());
        }
        if settings.race {
            args.push("-race".into());
        }

        args.push(package_target(directory));
        args
    }
}

impl TestRunner for GoTestRunner {
    fn run_on(&self, ctx: &RunContext, directory: &Path) -> Result<()> {
        let profile_name = ctx.scratch().next_profile_name();
        let args = self.args(
            ctx.settings(),
            &profile_name,
            ctx.scratch().path(),
            directory,
        );
        let (stdout, stderr) = ctx.sink().runner_stdio()?;

        info!(
            "Executing {} {}",
            self.program,
            args.iter()
                .map(|arg| arg.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let child = Command::new(&self.program)
            .args(&args)
            .stdout(stdout)
            .stderr(stderr)
            .spawn()
            .map_err(|source| GocoverdirError::RunnerSpawn {
                program: self.program.clone(),
                source,
            })?;

        let output = child.wait_with_output()?;
        ctx.sink().absorb(&output.stdout);
        ctx.sink().absorb(&output.stderr);

        if output.status.success() {
            Ok(())
        } else {
            Err(GocoverdirError::RunnerFailed {
                directory: directory.to_path_buf(),
                status: output.status,
            })
        }
    }
}

/// Package argument for a directory.
///
/// Plain relative paths get a `./` prefix so the runner reads them as filesystem
/// paths rather than import paths.
#[must_use]
pub fn package_target(directory: &Path) -> OsString {
    match directory.components().next() {
        None => OsString::from("."),
        Some(Component::Normal(_)) => {
            let mut target = OsString::from("./");
            target.push(directory.as_os_str());
            target
        }
        Some(_) => directory.as_os_str().to_os_string(),
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
