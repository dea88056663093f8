//! Configuration module for Harvest
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (HARVEST_*)
//! 3. Project config (harvest.toml)
//! 4. User config (~/.config/harvest/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::PROJECT_CONFIG_FILE;
pub use types::{Config, OutputConfig, ResolveConfig, Verbosity};
