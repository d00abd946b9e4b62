use std::collections::BTreeMap;
use std::path::Path;

use regex::Regex;

use crate::error::{GocoverdirError, Result};

use super::{Profile, ProfileBlock};

const MODE_PREFIX: &str = "mode: ";

/// Parser for the line-oriented profile format written by `go test -coverprofile`.
///
/// ```text
/// mode: set
/// example.com/pkg/file.go:12.34,14.2 3 1
/// ```
pub struct ProfileParser {
    block_pattern: Regex,
}

impl Default for ProfileParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileParser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            block_pattern: Regex::new(
                r"^(.+):([0-9]+)\.([0-9]+),([0-9]+)\.([0-9]+) ([0-9]+) ([0-9]+)$",
            )
            .expect("Invalid regex"),
        }
    }

    /// Parse the profile stored at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is malformed.
    pub fn parse_file(&self, path: &Path) -> Result<Vec<Profile>> {
        let content = std::fs::read_to_string(path).map_err(|source| GocoverdirError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse(&content, path)
    }

    /// Parse profile text; `source` is only used in error messages.
    ///
    /// Profiles come back sorted by file name, each with its blocks sorted by start
    /// position and duplicate blocks folded together. Empty input yields no profiles.
    ///
    /// # Errors
    /// Returns an error on a missing mode line, a malformed block line, conflicting
    /// modes, or duplicate blocks with different statement counts.
    pub fn parse(&self, content: &str, source: &Path) -> Result<Vec<Profile>> {
        let parse_error = |line: usize, message: String| GocoverdirError::ProfileParse {
            path: source.to_path_buf(),
            line,
            message,
        };

        let mut mode: Option<&str> = None;
        let mut files: BTreeMap<&str, Vec<(usize, ProfileBlock)>> = BTreeMap::new();

        for (index, line) in content.lines().enumerate() {
            let line_no = index + 1;
            if line.trim().is_empty() {
                continue;
            }

            if let Some(line_mode) = line.strip_prefix(MODE_PREFIX) {
                match mode {
                    None if !line_mode.is_empty() => mode = Some(line_mode),
                    Some(current) if current == line_mode => {}
                    Some(current) => {
                        return Err(parse_error(
                            line_no,
                            format!("mode '{line_mode}' conflicts with '{current}'"),
                        ));
                    }
                    None => return Err(parse_error(line_no, "bad mode line".to_string())),
                }
                continue;
            }
            if mode.is_none() {
                return Err(parse_error(
                    line_no,
                    format!("expected '{MODE_PREFIX}<mode>' header, found '{line}'"),
                ));
            }

            let (file_name, block) = self.parse_block(line).ok_or_else(|| {
                parse_error(line_no, format!("line '{line}' doesn't match expected format"))
            })?;
            files.entry(file_name).or_default().push((line_no, block));
        }

        let Some(mode) = mode else {
            return Ok(Vec::new());
        };

        files
            .into_iter()
            .map(|(file_name, blocks)| {
                let blocks = fold_duplicates(blocks, mode).map_err(|(line_no, message)| {
                    parse_error(line_no, format!("{file_name}: {message}"))
                })?;
                Ok(Profile {
                    file_name: file_name.to_string(),
                    mode: mode.to_string(),
                    blocks,
                })
            })
            .collect()
    }

    fn parse_block<'a>(&self, line: &'a str) -> Option<(&'a str, ProfileBlock)> {
        let caps = self.block_pattern.captures(line)?;
        let file_name = caps.get(1)?.as_str();
        let number = |i: usize| caps.get(i).map(|m| m.as_str());

        Some((
            file_name,
            ProfileBlock {
                start_line: number(2)?.parse().ok()?,
                start_col: number(3)?.parse().ok()?,
                end_line: number(4)?.parse().ok()?,
                end_col: number(5)?.parse().ok()?,
                num_stmt: number(6)?.parse().ok()?,
                count: number(7)?.parse().ok()?,
            },
        ))
    }
}

/// Sort blocks by start position and merge blocks covering the same range.
///
/// In `set` mode hits are OR-ed, otherwise they are summed. Each block carries the
/// profile line it came from, reported when duplicates disagree.
fn fold_duplicates(
    mut blocks: Vec<(usize, ProfileBlock)>,
    mode: &str,
) -> std::result::Result<Vec<ProfileBlock>, (usize, String)> {
    blocks.sort_by_key(|(_, b)| (b.start_line, b.start_col, b.end_line, b.end_col));

    let mut folded: Vec<ProfileBlock> = Vec::with_capacity(blocks.len());
    for (line_no, block) in blocks {
        let Some(last) = folded.last_mut().filter(|last| last.same_range(&block)) else {
            folded.push(block);
            continue;
        };
        if last.num_stmt != block.num_stmt {
            return Err((
                line_no,
                format!(
                    "inconsistent NumStmt: changed from {} to {}",
                    last.num_stmt, block.num_stmt
                ),
            ));
        }
        if mode == "set" {
            last.count |= block.count;
        } else {
            last.count = last.count.saturating_add(block.count);
        }
    }
    Ok(folded)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
