mod filter;

pub use filter::{ExtensionFilter, FileFilter};

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::context::RunContext;
use crate::error::{GocoverdirError, Result};
use crate::runner::TestRunner;

/// Depth-first directory walk that tests every test-eligible directory.
///
/// A directory is visited only while its depth (root = 0) does not exceed the
/// configured maximum; directories whose basename is ignored are never entered.
/// The first failure aborts the whole walk.
pub struct Walker<'a, R: TestRunner, F: FileFilter> {
    ctx: &'a RunContext,
    runner: &'a R,
    filter: F,
}

impl<'a, R: TestRunner> Walker<'a, R, ExtensionFilter> {
    /// Walker using the configured source extensions.
    #[must_use]
    pub fn new(ctx: &'a RunContext, runner: &'a R) -> Self {
        let filter = ExtensionFilter::new(ctx.settings().extensions.clone());
        Self::with_filter(ctx, runner, filter)
    }
}

impl<'a, R: TestRunner, F: FileFilter> Walker<'a, R, F> {
    #[must_use]
    pub const fn with_filter(ctx: &'a RunContext, runner: &'a R, filter: F) -> Self {
        Self {
            ctx,
            runner,
            filter,
        }
    }

    /// Walk from `root`, returning how many directories were tested.
    ///
    /// # Errors
    /// Returns the first directory-read or runner error encountered.
    pub fn walk(&self, root: &Path) -> Result<usize> {
        self.walk_dir(root, 0)
    }

    fn walk_dir(&self, dir: &Path, depth: usize) -> Result<usize> {
        debug!("Visiting {} at depth {depth}", dir.display());
        if depth > self.ctx.settings().max_depth {
            return Ok(0);
        }

        let entries = list_dir(dir)?;
        let mut tested = 0;

        if self.contains_source(&entries) {
            info!("Testing {}", dir.display());
            self.runner.run_on(self.ctx, dir)?;
            tested += 1;
        }

        for entry in entries.iter().filter(|e| e.file_type().is_dir()) {
            if self.ctx.settings().is_ignored(entry.file_name()) {
                debug!("Ignoring {}", entry.path().display());
                continue;
            }
            tested += self.walk_dir(entry.path(), depth + 1)?;
        }

        Ok(tested)
    }

    fn contains_source(&self, entries: &[DirEntry]) -> bool {
        entries
            .iter()
            .any(|e| !e.file_type().is_dir() && self.filter.should_include(e.path()))
    }
}

/// Immediate entries of `dir`, sorted by file name.
///
/// Fails when `dir` is missing or is not a directory.
fn list_dir(dir: &Path) -> Result<Vec<DirEntry>> {
    let read_error = |source| GocoverdirError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };

    let metadata = fs::metadata(dir).map_err(read_error)?;
    if !metadata.is_dir() {
        return Err(read_error(io::Error::new(
            io::ErrorKind::NotADirectory,
            "not a directory",
        )));
    }

    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|source| read_error(source.into()))
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
