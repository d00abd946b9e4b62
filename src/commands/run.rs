use std::io;
use std::path::Path;

use tracing::{error, info};

use crate::cli::Cli;
use crate::config::{
    Config, ConfigLoader, FileConfigLoader, RunSettings, split_ignore_dirs,
};
use crate::context::RunContext;
use crate::coverage;
use crate::logging::{self, LogSink};
use crate::merge::{merge_scratch, write_profile};
use crate::runner::GoTestRunner;
use crate::scanner::Walker;
use crate::scratch::ScratchArea;
use crate::{EXIT_ERROR, EXIT_SUCCESS, Result};

/// Run the whole pipeline and return the process exit code.
#[must_use]
pub fn run(cli: &Cli) -> i32 {
    let config = match load_config(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return EXIT_ERROR;
        }
    };

    let sink = match LogSink::open(&config.log.file) {
        Ok(sink) => sink,
        Err(e) => {
            eprintln!("Error: {e}");
            return EXIT_ERROR;
        }
    };
    logging::init(&sink);

    match run_impl(&cli.root, &config, sink.clone()) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            error!("{} error: {e}", e.error_type());
            sink.report_fatal(&e);
            e.exit_code()
        }
    }
}

/// Load the configuration file (unless disabled) and apply CLI overrides.
///
/// # Errors
/// Returns an error if the configuration file cannot be read or parsed.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if cli.no_config {
        Config::default()
    } else {
        let loader = FileConfigLoader::new();
        cli.config
            .as_deref()
            .map_or_else(|| loader.load(), |path| loader.load_from_path(path))?
    };

    apply_cli_overrides(&mut config, cli);
    Ok(config)
}

/// Layer explicitly given flags over the loaded configuration.
pub fn apply_cli_overrides(config: &mut Config, cli: &Cli) {
    if let Some(covermode) = cli.covermode {
        config.runner.covermode = covermode;
    }

    if let Some(cpu) = cli.cpu {
        config.runner.cpu = cpu;
    }

    if cli.race {
        config.runner.race = true;
    }

    if let Some(timeout) = &cli.timeout {
        config.runner.timeout.clone_from(timeout);
    }

    if let Some(depth) = cli.depth {
        config.scan.depth = depth;
    }

    if let Some(ignoredirs) = &cli.ignoredirs {
        config.scan.ignore_dirs = split_ignore_dirs(ignoredirs);
    }

    if let Some(coverprofile) = &cli.coverprofile {
        config.coverage.profile = Some(coverprofile.clone());
    }

    if cli.printcoverage {
        config.coverage.print = true;
    }

    if let Some(required) = cli.requiredcoverage {
        config.coverage.required = required;
    }

    if cli.htmlcoverage {
        config.coverage.html = true;
    }

    if let Some(logfile) = &cli.logfile {
        config.log.file.clone_from(logfile);
    }
}

/// Validate settings, then walk, merge and report inside a fresh scratch area.
///
/// The scratch area is removed whether or not the pipeline succeeds; a pipeline
/// error takes precedence over a cleanup error.
///
/// # Errors
/// Returns the first validation, traversal, merge or coverage error.
pub fn run_impl(root: &Path, config: &Config, sink: LogSink) -> Result<()> {
    let settings = RunSettings::resolve(config)?;
    let scratch = ScratchArea::create()?;
    let ctx = RunContext::new(settings, scratch, sink);

    let result = execute(&ctx, root);
    let cleanup = ctx.into_scratch().close();
    result.and(cleanup)
}

/// Walk `root`, merge the per-directory profiles and report coverage.
///
/// # Errors
/// Returns the first traversal, merge or coverage error.
pub fn execute(ctx: &RunContext, root: &Path) -> Result<()> {
    let settings = ctx.settings();
    let runner = GoTestRunner::detect(settings, root);

    let tested = Walker::new(ctx, &runner).walk(root)?;
    info!("Tested {tested} director{}", if tested == 1 { "y" } else { "ies" });

    let merged = merge_scratch(ctx.scratch())?;
    write_profile(&settings.coverprofile, &merged)?;

    coverage::report(settings, &mut io::stdout().lock())
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
