//! Concatenation of per-directory profiles into one combined profile.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{GocoverdirError, Result};
use crate::scratch::ScratchArea;

/// Merge every profile in the scratch area, in listing order.
///
/// # Errors
/// Returns an error if the scratch area cannot be listed or a profile cannot be read.
pub fn merge_scratch(scratch: &ScratchArea) -> Result<Vec<u8>> {
    let files = scratch.profile_files()?;
    info!("Merging {} profile(s)", files.len());
    merge_files(&files)
}

/// Read and merge the given profile files.
///
/// # Errors
/// Returns an error if any file cannot be read.
pub fn merge_files(files: &[PathBuf]) -> Result<Vec<u8>> {
    let mut merged = Vec::new();
    for path in files {
        let contents = fs::read(path).map_err(|source| GocoverdirError::FileRead {
            path: path.clone(),
            source,
        })?;
        append_profile(&mut merged, &contents);
    }
    Ok(merged)
}

/// Append one profile to the merged output.
///
/// The first non-empty profile is copied whole. Later ones lose their first line,
/// the `mode:` header, so the output carries a single header.
pub fn append_profile(merged: &mut Vec<u8>, contents: &[u8]) {
    if merged.is_empty() {
        merged.extend_from_slice(contents);
        return;
    }

    let body = contents
        .iter()
        .position(|&b| b == b'\n')
        .map_or(&[][..], |newline| &contents[newline + 1..]);
    if body.is_empty() {
        return;
    }
    if merged.last() != Some(&b'\n') {
        merged.push(b'\n');
    }
    merged.extend_from_slice(body);
}

/// Write the merged profile to `path`, replacing it atomically.
///
/// The bytes go to a temporary file beside `path` which is renamed over it, so a
/// failed write never leaves a truncated profile behind.
///
/// # Errors
/// Returns an error if the temporary file cannot be written or renamed.
pub fn write_profile(path: &Path, contents: &[u8]) -> Result<()> {
    let write_error = |source| GocoverdirError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_error)?;
    tmp.write_all(contents).map_err(write_error)?;
    tmp.as_file().sync_all().map_err(write_error)?;
    set_profile_permissions(tmp.as_file()).map_err(write_error)?;
    tmp.persist(path).map_err(|e| write_error(e.error))?;

    info!("Wrote combined profile to {}", path.display());
    Ok(())
}

#[cfg(unix)]
fn set_profile_permissions(file: &fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    file.set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
const fn set_profile_permissions(_file: &fs::File) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;
