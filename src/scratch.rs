//! Run-scoped scratch directory holding one profile per tested directory.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tempfile::TempDir;
use walkdir::WalkDir;

use crate::error::{GocoverdirError, Result};

const SCRATCH_PREFIX: &str = "gocoverdir";
const PROFILE_PREFIX: &str = "gocoverdirprofile";
const PROFILE_EXTENSION: &str = "cover";

/// Temporary directory owned by a single run.
///
/// Removed when dropped, including during a panic unwind. Use [`ScratchArea::close`]
/// to observe removal errors.
#[derive(Debug)]
pub struct ScratchArea {
    dir: TempDir,
    sequence: AtomicU64,
}

impl ScratchArea {
    /// Create a fresh scratch directory in the OS temp directory.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn create() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .tempdir()
            .map_err(|source| GocoverdirError::ScratchDir { source })?;
        Ok(Self::from_temp_dir(dir))
    }

    /// Create the scratch directory inside `parent`.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn create_in(parent: &Path) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .tempdir_in(parent)
            .map_err(|source| GocoverdirError::ScratchDir { source })?;
        Ok(Self::from_temp_dir(dir))
    }

    const fn from_temp_dir(dir: TempDir) -> Self {
        Self {
            dir,
            sequence: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Allocate a profile file name unique within this run.
    ///
    /// Numbers are zero-padded so that sorting names sorts by allocation order.
    pub fn next_profile_name(&self) -> String {
        let n = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{PROFILE_PREFIX}{n:06}.{PROFILE_EXTENSION}")
    }

    /// Regular files currently in the scratch directory, sorted by name.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be listed.
    pub fn profile_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(self.path())
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|source| GocoverdirError::DirectoryRead {
                path: self.path().to_path_buf(),
                source: source.into(),
            })?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    /// Remove the directory and everything in it.
    ///
    /// # Errors
    /// Returns an error if removal fails.
    pub fn close(self) -> Result<()> {
        let path = self.dir.path().to_path_buf();
        self.dir
            .close()
            .map_err(|source| GocoverdirError::FileWrite { path, source })
    }
}
