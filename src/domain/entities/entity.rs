//! Entity name
//!
//! Identity of a named unit (block, element or modifier of either) using the
//! origin naming scheme:
//!
//! - `block`
//! - `block_mod` (boolean modifier)
//! - `block_mod_val`
//! - `block__elem`
//! - `block__elem_mod_val`
//!
//! Two refs are equal iff their canonical ids match.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

const ELEM_DELIM: &str = "__";
const MOD_DELIM: char = '_';

/// Modifier value: boolean modifiers carry no value in their name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModValue {
    On,
    Value(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Modifier {
    pub name: String,
    pub value: ModValue,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid entity name '{name}': {reason}")]
pub struct EntityNameError {
    pub name: String,
    pub reason: String,
}

impl EntityNameError {
    fn new(name: &str, reason: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityRef {
    block: String,
    elem: Option<String>,
    modifier: Option<Modifier>,
    id: String,
}

impl EntityRef {
    /// Build an entity from its parts, validating every name segment.
    pub fn new(
        block: &str,
        elem: Option<&str>,
        modifier: Option<Modifier>,
    ) -> Result<Self, EntityNameError> {
        let mut id = String::from(block);
        check_segment(block)?;

        if let Some(elem) = elem {
            check_segment(elem)?;
            id.push_str(ELEM_DELIM);
            id.push_str(elem);
        }

        if let Some(m) = &modifier {
            check_segment(&m.name)?;
            id.push(MOD_DELIM);
            id.push_str(&m.name);
            if let ModValue::Value(v) = &m.value {
                check_segment(v)?;
                id.push(MOD_DELIM);
                id.push_str(v);
            }
        }

        Ok(Self {
            block: block.to_string(),
            elem: elem.map(str::to_string),
            modifier,
            id,
        })
    }

    pub fn block(name: &str) -> Result<Self, EntityNameError> {
        Self::new(name, None, None)
    }

    /// Parse a canonical entity name.
    pub fn parse(raw: &str) -> Result<Self, EntityNameError> {
        if raw.is_empty() {
            return Err(EntityNameError::new(raw, "name is empty"));
        }

        let parts: Vec<&str> = raw.split(ELEM_DELIM).collect();
        let (block_part, elem_part) = match parts.as_slice() {
            [block] => (*block, None),
            [block, elem] => (*block, Some(*elem)),
            _ => {
                return Err(EntityNameError::new(
                    raw,
                    "more than one element delimiter '__'",
                ))
            }
        };

        let entity = match elem_part {
            None => {
                let (block, modifier) = split_modifier(raw, block_part)?;
                Self::new(block, None, modifier)
            }
            Some(elem_part) => {
                if block_part.contains(MOD_DELIM) {
                    return Err(EntityNameError::new(
                        raw,
                        "block modifiers cannot be combined with an element",
                    ));
                }
                let (elem, modifier) = split_modifier(raw, elem_part)?;
                Self::new(block_part, Some(elem), modifier)
            }
        };
        entity.map_err(|e| EntityNameError::new(raw, e.reason))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn block_name(&self) -> &str {
        &self.block
    }

    pub fn elem_name(&self) -> Option<&str> {
        self.elem.as_deref()
    }

    pub fn modifier(&self) -> Option<&Modifier> {
        self.modifier.as_ref()
    }
}

fn split_modifier<'a>(
    raw: &str,
    part: &'a str,
) -> Result<(&'a str, Option<Modifier>), EntityNameError> {
    let segments: Vec<&str> = part.split(MOD_DELIM).collect();
    match segments.as_slice() {
        [name] => Ok((*name, None)),
        [name, mod_name] => Ok((
            *name,
            Some(Modifier {
                name: mod_name.to_string(),
                value: ModValue::On,
            }),
        )),
        [name, mod_name, mod_val] => Ok((
            *name,
            Some(Modifier {
                name: mod_name.to_string(),
                value: ModValue::Value(mod_val.to_string()),
            }),
        )),
        _ => Err(EntityNameError::new(raw, "too many modifier segments")),
    }
}

fn check_segment(segment: &str) -> Result<(), EntityNameError> {
    if segment.is_empty() {
        return Err(EntityNameError::new(segment, "empty name segment"));
    }
    if let Some(c) = segment
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-'))
    {
        return Err(EntityNameError::new(
            segment,
            format!("unexpected character '{}'", c),
        ));
    }
    Ok(())
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl std::str::FromStr for EntityRef {
    type Err = EntityNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for EntityRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.id)
    }
}

impl<'de> Deserialize<'de> for EntityRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
