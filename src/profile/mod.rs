//! In-memory coverage profile model.

mod parser;

pub use parser::ProfileParser;

/// A contiguous source region with its statement and execution counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileBlock {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
    pub num_stmt: u64,
    pub count: u64,
}

impl ProfileBlock {
    #[must_use]
    pub const fn is_covered(&self) -> bool {
        self.count > 0
    }

    const fn same_range(&self, other: &Self) -> bool {
        self.start_line == other.start_line
            && self.start_col == other.start_col
            && self.end_line == other.end_line
            && self.end_col == other.end_col
    }
}

/// Blocks of one source file, sorted by start position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub file_name: String,
    pub mode: String,
    pub blocks: Vec<ProfileBlock>,
}

impl Profile {
    #[must_use]
    pub fn total_statements(&self) -> u64 {
        self.blocks.iter().map(|b| b.num_stmt).sum()
    }

    /// Never exceeds [`Self::total_statements`].
    #[must_use]
    pub fn covered_statements(&self) -> u64 {
        self.blocks
            .iter()
            .filter(|b| b.is_covered())
            .map(|b| b.num_stmt)
            .sum()
    }
}
