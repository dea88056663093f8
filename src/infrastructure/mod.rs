//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `level/` - LevelWalker over directories (`ignore` crate)
//! - `deps/` - DepsReader for JSON / YAML deps files (`rayon` pool)

pub mod deps;
pub mod level;

// Re-export for convenience
pub use deps::FsDepsReader;
pub use level::FsLevelWalker;
