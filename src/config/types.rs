//! Configuration type definitions

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ConfigWarning, LevelMap, TechAliases};
use crate::error::HarvestResult;
use crate::infrastructure::deps::DEFAULT_READ_CONCURRENCY;

use super::loader;

/// Resolution tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveConfig {
    /// Worker threads used to read deps files
    #[serde(default = "default_read_concurrency")]
    pub read_concurrency: usize,

    /// Bound on the level walk in milliseconds; 0 waits indefinitely
    #[serde(default = "default_walk_timeout_ms")]
    pub walk_timeout_ms: u64,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            read_concurrency: default_read_concurrency(),
            walk_timeout_ms: default_walk_timeout_ms(),
        }
    }
}

impl ResolveConfig {
    pub fn walk_timeout(&self) -> Duration {
        Duration::from_millis(self.walk_timeout_ms)
    }
}

fn default_read_concurrency() -> usize {
    DEFAULT_READ_CONCURRENCY
}

fn default_walk_timeout_ms() -> u64 {
    1000
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub verbosity: Verbosity,
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    /// Verbosity requested by `-v` flags; zero keeps `self`.
    pub fn raised_by(self, count: u8) -> Self {
        let from_flags = match count {
            0 => return self,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        };
        self.max(from_flags)
    }

    pub fn level_filter(self) -> log::LevelFilter {
        match self {
            Verbosity::Quiet => log::LevelFilter::Error,
            Verbosity::Normal => log::LevelFilter::Warn,
            Verbosity::Verbose => log::LevelFilter::Info,
            Verbosity::Debug => log::LevelFilter::Debug,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "quiet" => Some(Verbosity::Quiet),
            "normal" => Some(Verbosity::Normal),
            "verbose" => Some(Verbosity::Verbose),
            "debug" => Some(Verbosity::Debug),
            _ => None,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Default levels, highest priority first
    #[serde(default)]
    pub levels: Vec<String>,

    #[serde(default)]
    pub tech_aliases: TechAliases,

    /// Per-level settings keyed by level path
    #[serde(default)]
    pub level: LevelMap,

    #[serde(default)]
    pub resolve: ResolveConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> HarvestResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> HarvestResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults, then apply env overrides
    pub fn load_or_default(project_root: Option<&Path>) -> HarvestResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(project_root)
    }

    /// Apply environment variable overrides (HARVEST_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }
}
