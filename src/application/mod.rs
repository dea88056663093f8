//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `ResolveUseCase` - Walk, read deps, build the graph, compute the closure, harvest files
//! - `FileStream` - Restartable sequence of the harvested files

pub mod resolve;
pub mod stream;

pub use resolve::{ClosureOutcome, ResolveOutcome, ResolveRequest, ResolveUseCase};
pub use stream::{FileStream, SourceFile};
