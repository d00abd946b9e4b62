use std::path::{Path, PathBuf};
use std::{env, fs, io};

use crate::error::{GocoverdirError, Result};

use super::Config;

/// Source of the `.gocoverdir.toml` settings layer.
pub trait ConfigLoader {
    /// Discover `.gocoverdir.toml` in the working directory, or fall back to defaults.
    ///
    /// # Errors
    /// Returns an error if a discovered file cannot be read or parsed.
    fn load(&self) -> Result<Config>;

    /// Load the file named by `--config`, which must exist.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    fn load_from_path(&self, path: &Path) -> Result<Config>;
}

pub const LOCAL_CONFIG_NAME: &str = ".gocoverdir.toml";

/// What the loader needs from the filesystem, so discovery can run against a fake.
pub trait FileSystem {
    /// # Errors
    /// Returns an error if the config file cannot be read.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Whether a config file (not a directory) sits at `path`.
    fn is_file(&self, path: &Path) -> bool;

    /// Directory searched for `.gocoverdir.toml` when no `--config` is given.
    ///
    /// # Errors
    /// Returns an error if the working directory is gone or unreadable.
    fn current_dir(&self) -> io::Result<PathBuf>;
}

/// [`FileSystem`] backed by `std::fs` and the process working directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        env::current_dir()
    }
}

/// Loads configuration from the filesystem.
///
/// `load` looks for `.gocoverdir.toml` in the current directory and falls back to
/// `Config::default()` when there is none.
#[derive(Debug)]
pub struct FileConfigLoader<F: FileSystem = RealFileSystem> {
    fs: F,
}

impl Default for FileConfigLoader<RealFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl FileConfigLoader<RealFileSystem> {
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: RealFileSystem }
    }
}

impl<F: FileSystem> FileConfigLoader<F> {
    #[must_use]
    pub const fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    fn local_config_path(&self) -> Option<PathBuf> {
        self.fs
            .current_dir()
            .ok()
            .map(|dir| dir.join(LOCAL_CONFIG_NAME))
    }

    fn parse_config(content: &str) -> Result<Config> {
        toml::from_str(content).map_err(GocoverdirError::from)
    }
}

impl<F: FileSystem> ConfigLoader for FileConfigLoader<F> {
    fn load(&self) -> Result<Config> {
        match self.local_config_path() {
            Some(path) if self.fs.is_file(&path) => self.load_from_path(&path),
            _ => Ok(Config::default()),
        }
    }

    fn load_from_path(&self, path: &Path) -> Result<Config> {
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|source| GocoverdirError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse_config(&content)
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
