//! Domain Entities
//!
//! Core domain entities that have identity.
//! - `EntityRef` - A named unit (block, element, modifier)
//! - `Cell` - An entity at an optional technology
//! - `FileEntity` - A file found on a level

mod cell;
mod entity;
mod file_entity;

pub use cell::Cell;
pub use entity::{EntityNameError, EntityRef, ModValue, Modifier};
pub use file_entity::{FileEntity, DEPS_TECHS};
