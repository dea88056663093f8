//! File entity
//!
//! One file found on a level, tagged with the entity and technology it belongs to.

use std::path::PathBuf;

use serde::Serialize;

use super::EntityRef;

/// Technologies of deps files.
pub const DEPS_TECHS: [&str; 3] = ["deps.json", "deps.yaml", "deps.yml"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntity {
    pub entity: EntityRef,
    pub tech: String,
    pub level: String,
    pub path: PathBuf,
}

impl FileEntity {
    pub fn new(
        entity: EntityRef,
        tech: impl Into<String>,
        level: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            entity,
            tech: tech.into(),
            level: level.into(),
            path: path.into(),
        }
    }

    /// Build from a file name of the form `<entity>.<tech>`.
    ///
    /// Returns `None` for names without a tech suffix or with an invalid entity name.
    pub fn from_file_name(
        file_name: &str,
        level: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Option<Self> {
        let (name, tech) = file_name.split_once('.')?;
        if tech.is_empty() {
            return None;
        }
        let entity = EntityRef::parse(name).ok()?;
        Some(Self::new(entity, tech, level, path))
    }

    pub fn is_deps(&self) -> bool {
        DEPS_TECHS.contains(&self.tech.as_str())
    }

    /// Index key shared with declaration cells: `id.tech`.
    pub fn key(&self) -> String {
        format!("{}.{}", self.entity.id(), self.tech)
    }
}
