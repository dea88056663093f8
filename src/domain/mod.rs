//! Domain Layer
//!
//! Pure resolution logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Entity names, cells, file entities
//! - `value_objects/` - Tech aliases, level settings, cancellation
//! - `services/` - Normalizer, EdgeParser, DependencyGraph, TechMapper, Harvester
//! - `ports/` - Interface definitions for infrastructure (LevelWalker, DepsReader)
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system directly
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
