//! Domain Services
//!
//! Pure resolution logic: shorthand normalization, edge parsing, the
//! dependency graph, tech expansion and harvesting. No I/O.

pub mod decl_normalizer;
pub mod dependency_graph;
pub mod edge_parser;
pub mod harvester;
pub mod tech_mapper;

pub use decl_normalizer::{normalize, DeclError, DeclShape, DepRef};
pub use dependency_graph::{DependencyGraph, Relation};
pub use edge_parser::{parse, parse_edge_set, DepsRecord, Edge, EdgeSet};
pub use harvester::{harvest, harvest_declaration};
pub use tech_mapper::{expand, ExpandedCell};
