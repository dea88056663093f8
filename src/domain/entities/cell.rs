//! Cell entity
//!
//! An (entity, technology) pair. A cell without a technology stands for the
//! entity as a whole.

use std::fmt;

use serde::Serialize;

use super::EntityRef;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Cell {
    pub entity: EntityRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech: Option<String>,
}

impl Cell {
    pub fn new(entity: EntityRef, tech: Option<String>) -> Self {
        Self { entity, tech }
    }

    pub fn entity(entity: EntityRef) -> Self {
        Self { entity, tech: None }
    }

    pub fn with_tech(entity: EntityRef, tech: impl Into<String>) -> Self {
        Self {
            entity,
            tech: Some(tech.into()),
        }
    }

    /// Parse `name` or `name.tech` (the tech may itself contain dots).
    pub fn parse(raw: &str) -> Result<Self, super::EntityNameError> {
        match raw.split_once('.') {
            Some((name, tech)) if !tech.is_empty() => {
                Ok(Self::with_tech(EntityRef::parse(name)?, tech))
            }
            _ => Ok(Self::entity(EntityRef::parse(raw)?)),
        }
    }

    pub fn id(&self) -> &str {
        self.entity.id()
    }

    pub fn tech(&self) -> Option<&str> {
        self.tech.as_deref()
    }

    /// Same entity, with `tech` filled in when this cell has none.
    pub fn at_tech(&self, tech: &str) -> Self {
        Self {
            entity: self.entity.clone(),
            tech: Some(self.tech.clone().unwrap_or_else(|| tech.to_string())),
        }
    }

    /// Removal match: a tech-less cell covers every tech of its entity.
    pub fn covers(&self, other: &Cell) -> bool {
        self.entity == other.entity && (self.tech.is_none() || self.tech == other.tech)
    }

    /// Key used for indexing: `id` or `id.tech`.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tech {
            Some(tech) => write!(f, "{}.{}", self.entity, tech),
            None => write!(f, "{}", self.entity),
        }
    }
}
