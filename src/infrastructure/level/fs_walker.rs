//! File system LevelWalker implementation
//!
//! Walks each level with `ignore::WalkBuilder`. Version-control ignore files
//! are not consulted; a `.harvestignore` file (gitignore syntax) inside a
//! level hides matching paths.

use std::path::Path;

use ignore::WalkBuilder;

use crate::domain::entities::FileEntity;
use crate::domain::ports::{LevelSnapshot, LevelWalker, WalkError, WalkProgress};
use crate::domain::value_objects::{is_required, LevelMap};

pub const IGNORE_FILE_NAME: &str = ".harvestignore";

#[derive(Debug, Clone, Default)]
pub struct FsLevelWalker {
    follow_links: bool,
}

impl FsLevelWalker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn follow_links(mut self, yes: bool) -> Self {
        self.follow_links = yes;
        self
    }

    fn walk_level(
        &self,
        level: &str,
        files: &mut Vec<FileEntity>,
        progress: WalkProgress<'_>,
    ) -> Result<(), WalkError> {
        let root = Path::new(level);
        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .hidden(false)
            .follow_links(self.follow_links)
            .add_custom_ignore_filename(IGNORE_FILE_NAME)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            let entry = entry.map_err(|e| WalkError::Io {
                path: root.to_path_buf(),
                message: e.to_string(),
            })?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                log::trace!("skipping non-UTF-8 file name {}", entry.path().display());
                continue;
            };
            match FileEntity::from_file_name(name, level, entry.path()) {
                Some(file) => files.push(file),
                None => log::trace!("skipping {}", entry.path().display()),
            }
            if !progress() {
                return Err(WalkError::Stopped);
            }
        }
        Ok(())
    }
}

impl LevelWalker for FsLevelWalker {
    fn walk_with_progress(
        &self,
        levels: &[String],
        config: &LevelMap,
        progress: WalkProgress<'_>,
    ) -> Result<LevelSnapshot, WalkError> {
        let mut snapshot = LevelSnapshot::default();

        for level in levels {
            let root = Path::new(level);
            if !root.is_dir() {
                if is_required(config, level) {
                    return Err(WalkError::LevelNotFound {
                        path: root.to_path_buf(),
                    });
                }
                log::warn!("level not found, skipping: {}", level);
                snapshot.missing.push(level.clone());
            } else {
                let before = snapshot.files.len();
                self.walk_level(level, &mut snapshot.files, progress)?;
                log::debug!(
                    "level {}: {} files",
                    level,
                    snapshot.files.len() - before
                );
            }
            if !progress() {
                return Err(WalkError::Stopped);
            }
        }

        Ok(snapshot)
    }
}
