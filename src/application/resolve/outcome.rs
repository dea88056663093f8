//! Resolve Outcome

use crate::domain::entities::{Cell, FileEntity};

/// Ordered closure of a declaration, before files are matched.
#[derive(Debug, Clone, Default)]
pub struct ClosureOutcome {
    pub closure: Vec<Cell>,
    /// Files seen on the levels; reused by `resolve`
    pub snapshot: Vec<FileEntity>,
    /// Non-fatal problems (missing levels and the like)
    pub warnings: Vec<String>,
}

/// Result of a full resolution
#[derive(Debug, Clone, Default)]
pub struct ResolveOutcome {
    /// Files in output order
    pub files: Vec<FileEntity>,
    pub closure: Vec<Cell>,
    pub warnings: Vec<String>,
}

impl ResolveOutcome {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
