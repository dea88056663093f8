//! Declaration normalizer
//!
//! Turns dependency shorthand (a JSON/YAML value) into canonical references.
//!
//! Accepted shapes:
//! - `"b1"`, `"b1__e"`, `"b1.css"` - entity name with optional tech
//! - `{ block, elem, mod, val, tech }` - a single entity
//! - `{ block, mods: { m: v | true | [v1, v2] } }` - the entity plus each modifier
//! - `{ block, elems: ["e1", { elem: "e2", mods: {...} }] }` - the block plus each element
//! - a list of any of the above
//!
//! A reference without `block` is relative and gets anchored to the owning
//! scope by [`DepRef::fulfill`].

use serde_json::{Map, Value};

use crate::domain::entities::{Cell, EntityRef, ModValue, Modifier};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DeclError {
    #[error("{0}")]
    Format(String),

    #[error("{0}")]
    Scope(String),
}

/// Shorthand declaration, parsed once from the raw value.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclShape {
    Name(String),
    Ref(RefShape),
    List(Vec<DeclShape>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefShape {
    pub block: Option<String>,
    pub elem: Option<String>,
    pub elems: Vec<ElemShape>,
    pub modifier: Option<(String, ModValue)>,
    pub mods: Vec<(String, ModValue)>,
    pub tech: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElemShape {
    pub elem: String,
    pub mods: Vec<(String, ModValue)>,
}

/// A canonical, possibly relative, dependency reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepRef {
    pub block: Option<String>,
    pub elem: Option<String>,
    pub modifier: Option<Modifier>,
    pub tech: Option<String>,
}

/// Normalize a raw shorthand value into canonical references.
pub fn normalize(value: &Value) -> Result<Vec<DepRef>, DeclError> {
    let shape = DeclShape::from_value(value)?;
    let mut out = Vec::new();
    shape.expand_into(&mut out)?;
    Ok(out)
}

impl DeclShape {
    pub fn from_value(value: &Value) -> Result<Self, DeclError> {
        match value {
            Value::String(s) => Ok(DeclShape::Name(s.clone())),
            Value::Object(obj) => Ok(DeclShape::Ref(RefShape::from_object(obj)?)),
            Value::Array(items) => items
                .iter()
                .map(DeclShape::from_value)
                .collect::<Result<Vec<_>, _>>()
                .map(DeclShape::List),
            other => Err(DeclError::Format(format!(
                "expected string, object or list, got {}",
                kind_of(other)
            ))),
        }
    }

    fn expand_into(&self, out: &mut Vec<DepRef>) -> Result<(), DeclError> {
        match self {
            DeclShape::Name(raw) => {
                let cell = Cell::parse(raw).map_err(|e| DeclError::Format(e.to_string()))?;
                out.push(DepRef::from_entity(&cell.entity, cell.tech));
            }
            DeclShape::List(items) => {
                for item in items {
                    item.expand_into(out)?;
                }
            }
            DeclShape::Ref(r) => r.expand_into(out),
        }
        Ok(())
    }
}

impl RefShape {
    fn from_object(obj: &Map<String, Value>) -> Result<Self, DeclError> {
        let mut shape = RefShape::default();
        let mut mod_name: Option<String> = None;
        let mut mod_val: Option<ModValue> = None;

        for (key, value) in obj {
            match key.as_str() {
                "block" => shape.block = Some(expect_name(key, value)?),
                "elem" => shape.elem = Some(expect_name(key, value)?),
                "elems" => shape.elems = parse_elems(value)?,
                "mod" | "modName" => mod_name = Some(expect_name(key, value)?),
                "val" | "modVal" => mod_val = Some(parse_mod_value(key, value)?),
                "mods" => shape.mods = parse_mods(value)?,
                "tech" => shape.tech = Some(expect_name(key, value)?),
                other => {
                    return Err(DeclError::Format(format!("unknown key '{}'", other)));
                }
            }
        }

        if shape.elem.is_some() && obj.contains_key("elems") {
            return Err(DeclError::Format(
                "'elem' and 'elems' cannot be used together".to_string(),
            ));
        }
        match (mod_name, mod_val) {
            (Some(_), _) if obj.contains_key("mods") => {
                return Err(DeclError::Format(
                    "'mod' and 'mods' cannot be used together".to_string(),
                ));
            }
            (Some(name), val) => shape.modifier = Some((name, val.unwrap_or(ModValue::On))),
            (None, Some(_)) => {
                return Err(DeclError::Format("'val' requires 'mod'".to_string()));
            }
            (None, None) => {}
        }

        Ok(shape)
    }

    fn expand_into(&self, out: &mut Vec<DepRef>) {
        let make = |elem: Option<&String>, modifier: Option<&(String, ModValue)>| DepRef {
            block: self.block.clone(),
            elem: elem.cloned(),
            modifier: modifier.map(|(name, value)| Modifier {
                name: name.clone(),
                value: value.clone(),
            }),
            tech: self.tech.clone(),
        };

        if let Some(modifier) = &self.modifier {
            out.push(make(self.elem.as_ref(), Some(modifier)));
            return;
        }

        if !self.elems.is_empty() || !self.mods.is_empty() {
            out.push(make(self.elem.as_ref(), None));
            for m in &self.mods {
                out.push(make(self.elem.as_ref(), Some(m)));
            }
            for e in &self.elems {
                out.push(make(Some(&e.elem), None));
                for m in &e.mods {
                    out.push(make(Some(&e.elem), Some(m)));
                }
            }
            return;
        }

        out.push(make(self.elem.as_ref(), None));
    }
}

impl DepRef {
    pub fn from_entity(entity: &EntityRef, tech: Option<String>) -> Self {
        Self {
            block: Some(entity.block_name().to_string()),
            elem: entity.elem_name().map(str::to_string),
            modifier: entity.modifier().cloned(),
            tech,
        }
    }

    /// Anchor this reference to `scope` and build the resulting cell.
    ///
    /// - with `block`: absolute, the scope is not consulted
    /// - without `block`, `elem` and modifier: the scope entity itself
    /// - without `block`: the scope block, plus the scope elem unless `elem` is given
    pub fn fulfill(&self, scope: Option<&Cell>) -> Result<Cell, DeclError> {
        let format_err = |e: crate::domain::entities::EntityNameError| {
            DeclError::Format(e.to_string())
        };

        let entity = match &self.block {
            Some(block) => {
                EntityRef::new(block, self.elem.as_deref(), self.modifier.clone())
                    .map_err(format_err)?
            }
            None => {
                let scope = scope.ok_or_else(|| {
                    DeclError::Scope(format!(
                        "relative reference '{}' has no owning entity",
                        self.describe()
                    ))
                })?;
                if self.elem.is_none() && self.modifier.is_none() {
                    scope.entity.clone()
                } else {
                    let elem = self.elem.as_deref().or(scope.entity.elem_name());
                    EntityRef::new(scope.entity.block_name(), elem, self.modifier.clone())
                        .map_err(format_err)?
                }
            }
        };

        Ok(Cell::new(entity, self.tech.clone()))
    }

    /// Canonical value form; normalizing it yields this reference again.
    pub fn to_value(&self) -> Value {
        let mut obj = Map::new();
        if let Some(block) = &self.block {
            obj.insert("block".to_string(), Value::String(block.clone()));
        }
        if let Some(elem) = &self.elem {
            obj.insert("elem".to_string(), Value::String(elem.clone()));
        }
        if let Some(m) = &self.modifier {
            obj.insert("mod".to_string(), Value::String(m.name.clone()));
            let val = match &m.value {
                ModValue::On => Value::Bool(true),
                ModValue::Value(v) => Value::String(v.clone()),
            };
            obj.insert("val".to_string(), val);
        }
        if let Some(tech) = &self.tech {
            obj.insert("tech".to_string(), Value::String(tech.clone()));
        }
        Value::Object(obj)
    }

    fn describe(&self) -> String {
        self.to_value().to_string()
    }
}

fn expect_name(key: &str, value: &Value) -> Result<String, DeclError> {
    match value {
        Value::String(s) if !s.is_empty() => Ok(s.clone()),
        Value::String(_) => Err(DeclError::Format(format!("'{}' must not be empty", key))),
        other => Err(DeclError::Format(format!(
            "'{}' must be a string, got {}",
            key,
            kind_of(other)
        ))),
    }
}

fn parse_mod_value(key: &str, value: &Value) -> Result<ModValue, DeclError> {
    match value {
        Value::Bool(true) => Ok(ModValue::On),
        Value::String(s) if !s.is_empty() => Ok(ModValue::Value(s.clone())),
        other => Err(DeclError::Format(format!(
            "'{}' must be a non-empty string or true, got {}",
            key,
            kind_of(other)
        ))),
    }
}

fn parse_mods(value: &Value) -> Result<Vec<(String, ModValue)>, DeclError> {
    match value {
        Value::Object(obj) => {
            let mut mods = Vec::new();
            for (name, v) in obj {
                match v {
                    Value::Array(values) => {
                        for item in values {
                            mods.push((name.clone(), parse_mod_value(name, item)?));
                        }
                    }
                    single => mods.push((name.clone(), parse_mod_value(name, single)?)),
                }
            }
            Ok(mods)
        }
        // `mods: ["m1", "m2"]` declares boolean modifiers
        Value::Array(names) => names
            .iter()
            .map(|n| expect_name("mods", n).map(|name| (name, ModValue::On)))
            .collect(),
        other => Err(DeclError::Format(format!(
            "'mods' must be an object or list, got {}",
            kind_of(other)
        ))),
    }
}

fn parse_elems(value: &Value) -> Result<Vec<ElemShape>, DeclError> {
    let items = match value {
        Value::Array(items) => items.as_slice(),
        single @ (Value::String(_) | Value::Object(_)) => std::slice::from_ref(single),
        other => {
            return Err(DeclError::Format(format!(
                "'elems' must be a string, object or list, got {}",
                kind_of(other)
            )))
        }
    };

    items
        .iter()
        .map(|item| match item {
            Value::String(_) => Ok(ElemShape {
                elem: expect_name("elems", item)?,
                mods: Vec::new(),
            }),
            Value::Object(obj) => {
                if let Some(key) = obj.keys().find(|k| *k != "elem" && *k != "mods") {
                    return Err(DeclError::Format(format!(
                        "unknown key '{}' in 'elems' item",
                        key
                    )));
                }
                let elem = obj
                    .get("elem")
                    .ok_or_else(|| DeclError::Format("'elems' item requires 'elem'".to_string()))
                    .and_then(|v| expect_name("elem", v))?;
                let mods = match obj.get("mods") {
                    Some(m) => parse_mods(m)?,
                    None => Vec::new(),
                };
                Ok(ElemShape { elem, mods })
            }
            other => Err(DeclError::Format(format!(
                "'elems' item must be a string or object, got {}",
                kind_of(other)
            ))),
        })
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
