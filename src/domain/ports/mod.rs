//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod deps_reader;
pub mod level_walker;

pub use deps_reader::DepsReader;
pub use level_walker::{LevelSnapshot, LevelWalker, WalkError, WalkProgress};
