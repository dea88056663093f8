//! Resolve Request

use std::time::Duration;

use crate::domain::entities::Cell;
use crate::domain::value_objects::{LevelMap, TechAliases};

pub const DEFAULT_WALK_TIMEOUT: Duration = Duration::from_millis(1000);

/// Input for one resolution
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    /// Level paths, highest priority first
    pub levels: Vec<String>,
    /// Target cells; a target without a tech is taken at every requested tech
    pub declaration: Vec<Cell>,
    /// Requested technologies
    pub techs: Vec<String>,
    pub tech_aliases: TechAliases,
    pub level_config: LevelMap,
    /// Bound on the level walk; zero waits indefinitely
    pub walk_timeout: Duration,
}

impl ResolveRequest {
    pub fn new(levels: Vec<String>, declaration: Vec<Cell>, techs: Vec<String>) -> Self {
        Self {
            levels,
            declaration,
            techs,
            tech_aliases: TechAliases::new(),
            level_config: LevelMap::new(),
            walk_timeout: DEFAULT_WALK_TIMEOUT,
        }
    }

    pub fn with_aliases(mut self, aliases: TechAliases) -> Self {
        self.tech_aliases = aliases;
        self
    }

    pub fn with_level_config(mut self, config: LevelMap) -> Self {
        self.level_config = config;
        self
    }

    pub fn with_walk_timeout(mut self, timeout: Duration) -> Self {
        self.walk_timeout = timeout;
        self
    }
}
