//! LevelWalker port
//!
//! Produces the filesystem snapshot for a set of levels.

use std::path::PathBuf;

use crate::domain::entities::FileEntity;
use crate::domain::value_objects::LevelMap;

/// Files found on the walked levels, plus levels that do not exist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelSnapshot {
    pub files: Vec<FileEntity>,
    pub missing: Vec<String>,
}

/// Called by a walker whenever it produces data. Returning `false` asks the
/// walker to stop with [`WalkError::Stopped`].
pub type WalkProgress<'a> = &'a (dyn Fn() -> bool + 'a);

pub trait LevelWalker: Send + Sync {
    /// Walk every level and return the files it contains, reporting progress
    /// for each file found and each level finished.
    ///
    /// A missing level is reported in `missing` unless `config` marks it
    /// required, in which case the walk fails.
    fn walk_with_progress(
        &self,
        levels: &[String],
        config: &LevelMap,
        progress: WalkProgress<'_>,
    ) -> Result<LevelSnapshot, WalkError>;

    fn walk(&self, levels: &[String], config: &LevelMap) -> Result<LevelSnapshot, WalkError> {
        self.walk_with_progress(levels, config, &|| true)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WalkError {
    #[error("required level not found: {path}\n  → Fix: create the directory or set required = false")]
    LevelNotFound { path: PathBuf },

    #[error("failed to walk {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("level walk stopped before completion")]
    Stopped,
}
