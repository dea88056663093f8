//! Harvest - dependency-aware file harvesting for layered entity trees
//!
//! Harvest resolves a declaration (named entities plus a technology) into a
//! deterministically ordered list of source files drawn from several layered
//! level directories. Per-entity deps files (`mustDeps` / `shouldDeps` /
//! `noDeps`) drive the transitive closure and its ordering; tech aliases map
//! declared technologies onto the file technologies found on disk.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{FileStream, ResolveOutcome, ResolveRequest, ResolveUseCase, SourceFile};
pub use config::Config;
pub use domain::entities::{Cell, EntityRef, FileEntity};
pub use domain::services::{expand, harvest, harvest_declaration, DependencyGraph, Edge};
pub use domain::value_objects::{CancelToken, TechAliases};
pub use error::{HarvestError, HarvestResult};
