//! Error types for Harvest
//!
//! Uses `thiserror` for library errors; the binary wraps them with `anyhow`.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for Harvest operations
pub type HarvestResult<T> = Result<T, HarvestError>;

/// Main error type for Harvest operations
#[derive(Error, Debug)]
pub enum HarvestError {
    /// Malformed dependency shorthand in a deps record
    #[error("invalid declaration in {record}: {message}")]
    DeclarationFormat { record: String, message: String },

    /// Dependency reference could not be anchored to a scope
    #[error("cannot resolve scope for {record}: {message}")]
    ScopeResolution { record: String, message: String },

    /// Ordered dependencies form a cycle
    #[error("cyclic dependency between {}", .cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },

    /// Closure resolved but nothing on disk satisfies it (reported as a warning)
    #[error("no files on levels [{}] match the resolved declaration", .levels.join(", "))]
    NoMatchingFiles { levels: Vec<String> },

    /// Level introspection produced no answer within the bounded wait
    #[error("level walk produced no data within {}ms", .waited.as_millis())]
    Timeout { waited: Duration },

    #[error("levels required to harvest files (got an empty list)")]
    EmptyLevels,

    #[error("declaration required to harvest entities (got an empty list)")]
    EmptyDeclaration,

    #[error("technology required to build exactly something (got none)")]
    EmptyTechnology,

    /// Level configured as required is missing on disk
    #[error("level not found: {path}")]
    LevelNotFound { path: PathBuf },

    /// Entity name does not follow the naming scheme
    #[error("invalid entity name '{name}': {message}")]
    InvalidEntityName { name: String, message: String },

    /// Failed to read or evaluate a deps file
    #[error("failed to read deps file {path}: {message}")]
    DepsRead { path: PathBuf, message: String },

    /// Failed to read a harvested file
    #[error("failed to read {path}: {message}")]
    SourceRead { path: PathBuf, message: String },

    /// Invalid configuration file
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Level walk failed
    #[error("failed to walk levels: {message}")]
    Walk { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Resolution was abandoned by the caller
    #[error("resolution cancelled")]
    Cancelled,
}
