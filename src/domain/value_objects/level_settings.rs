//! Per-level settings

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelSettings {
    /// Fail the walk when the level directory is missing.
    pub required: bool,
}

/// Settings keyed by level path as written in configuration.
pub type LevelMap = BTreeMap<String, LevelSettings>;

/// Whether `level` is configured as required.
pub fn is_required(config: &LevelMap, level: &str) -> bool {
    config.get(level).is_some_and(|s| s.required)
}
