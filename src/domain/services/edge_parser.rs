//! Edge parser
//!
//! Turns per-entity deps records (`mustDeps` / `shouldDeps` / `noDeps`) into a
//! deduplicated edge list. Records are applied strictly in input order, so
//! callers present them sorted by level priority.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::entities::{Cell, EntityRef};
use crate::domain::services::decl_normalizer::{normalize, DeclError};
use crate::error::{HarvestError, HarvestResult};

/// A directed dependency between two cells.
///
/// `ordered` edges (must) place `depend_on` before `vertex`; unordered edges
/// (should) only require both to be present.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    pub vertex: Cell,
    pub depend_on: Cell,
    pub ordered: bool,
}

impl Edge {
    pub fn must(vertex: Cell, depend_on: Cell) -> Self {
        Self {
            vertex,
            depend_on,
            ordered: true,
        }
    }

    pub fn should(vertex: Cell, depend_on: Cell) -> Self {
        Self {
            vertex,
            depend_on,
            ordered: false,
        }
    }
}

/// Raw deps data for one source unit.
#[derive(Debug, Clone)]
pub struct DepsRecord {
    /// Owning cell; deps files take it from their file name.
    pub scope: Option<Cell>,
    /// Where the data came from, for error reporting.
    pub source: Option<PathBuf>,
    /// One deps object or a list of them.
    pub data: Value,
}

impl DepsRecord {
    pub fn new(scope: Cell, data: Value) -> Self {
        Self {
            scope: Some(scope),
            source: None,
            data,
        }
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    fn label(&self) -> String {
        match (&self.source, &self.scope) {
            (Some(path), _) => path.display().to_string(),
            (None, Some(scope)) => scope.key(),
            (None, None) => "<anonymous record>".to_string(),
        }
    }
}

/// Edge storage with explicit dedup and suppression.
///
/// `remove` deletes every matching edge of both kinds and suppresses the
/// key: any later `add` with a matching key is ignored for the rest of the
/// parse. A tech-less cell in a removal pattern matches every tech of that
/// entity, on both the vertex and the dependency side.
#[derive(Debug, Default)]
pub struct EdgeSet {
    must: Vec<Edge>,
    should: Vec<Edge>,
    index: HashSet<Edge>,
    suppressed: HashMap<EntityRef, Vec<(Cell, Cell)>>,
}

impl EdgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an edge unless it is a self edge, a duplicate, or suppressed.
    ///
    /// Returns whether the edge was inserted.
    pub fn add(&mut self, edge: Edge) -> bool {
        if edge.vertex == edge.depend_on {
            return false;
        }
        if self.is_suppressed(&edge.vertex, &edge.depend_on) {
            log::trace!("skipping suppressed {} -> {}", edge.vertex, edge.depend_on);
            return false;
        }
        if !self.index.insert(edge.clone()) {
            return false;
        }
        if edge.ordered {
            self.must.push(edge);
        } else {
            self.should.push(edge);
        }
        true
    }

    /// Remove matching edges and suppress the key. Returns the number removed.
    pub fn remove(&mut self, vertex: &Cell, depend_on: &Cell) -> usize {
        let matches = |e: &Edge| vertex.covers(&e.vertex) && depend_on.covers(&e.depend_on);

        let before = self.must.len() + self.should.len();
        self.must.retain(|e| !matches(e));
        self.should.retain(|e| !matches(e));
        self.index.retain(|e| !matches(e));
        let removed = before - (self.must.len() + self.should.len());

        self.suppressed
            .entry(vertex.entity.clone())
            .or_default()
            .push((vertex.clone(), depend_on.clone()));

        removed
    }

    pub fn contains(&self, edge: &Edge) -> bool {
        self.index.contains(edge)
    }

    pub fn is_suppressed(&self, vertex: &Cell, depend_on: &Cell) -> bool {
        self.suppressed.get(&vertex.entity).is_some_and(|keys| {
            keys.iter()
                .any(|(v, d)| v.covers(vertex) && d.covers(depend_on))
        })
    }

    pub fn must(&self) -> &[Edge] {
        &self.must
    }

    pub fn should(&self) -> &[Edge] {
        &self.should
    }

    pub fn len(&self) -> usize {
        self.must.len() + self.should.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ordered edges first, then unordered ones, each in insertion order.
    pub fn into_edges(self) -> Vec<Edge> {
        let mut edges = self.must;
        edges.extend(self.should);
        edges
    }
}

/// Parse deps records into a flat edge list (must edges first).
pub fn parse(records: &[DepsRecord]) -> HarvestResult<Vec<Edge>> {
    Ok(parse_edge_set(records)?.into_edges())
}

/// Parse deps records into an [`EdgeSet`]. Fails on the first bad record.
pub fn parse_edge_set(records: &[DepsRecord]) -> HarvestResult<EdgeSet> {
    let mut set = EdgeSet::new();

    for record in records {
        apply_record(&mut set, record).map_err(|e| match e {
            DeclError::Format(message) => HarvestError::DeclarationFormat {
                record: record.label(),
                message,
            },
            DeclError::Scope(message) => HarvestError::ScopeResolution {
                record: record.label(),
                message,
            },
        })?;
    }

    log::debug!(
        "parsed {} records into {} ordered and {} unordered edges",
        records.len(),
        set.must().len(),
        set.should().len()
    );
    Ok(set)
}

fn apply_record(set: &mut EdgeSet, record: &DepsRecord) -> Result<(), DeclError> {
    let blocks = match &record.data {
        Value::Array(items) => items.as_slice(),
        single => std::slice::from_ref(single),
    };

    for block in blocks {
        let Value::Object(block) = block else {
            return Err(DeclError::Format(
                "deps entry must be an object".to_string(),
            ));
        };
        let scope = block_scope(record.scope.as_ref(), block)?;

        if let Some(value) = block.get("mustDeps") {
            for dep in normalize(value)? {
                set.add(Edge::must(scope.clone(), dep.fulfill(Some(&scope))?));
            }
        }
        if let Some(value) = block.get("shouldDeps") {
            for dep in normalize(value)? {
                set.add(Edge::should(scope.clone(), dep.fulfill(Some(&scope))?));
            }
        }
        if let Some(value) = block.get("noDeps") {
            for dep in normalize(value)? {
                let target = dep.fulfill(Some(&scope))?;
                let removed = set.remove(&scope, &target);
                log::trace!("noDeps {} -> {} removed {} edges", scope, target, removed);
            }
        }
    }

    Ok(())
}

/// Scope of one deps block: the record scope, narrowed by `elem` / `tech` keys.
fn block_scope(scope: Option<&Cell>, block: &Map<String, Value>) -> Result<Cell, DeclError> {
    if let Some(key) = block.keys().find(|k| {
        !matches!(
            k.as_str(),
            "mustDeps" | "shouldDeps" | "noDeps" | "tech" | "elem"
        )
    }) {
        return Err(DeclError::Format(format!("unknown deps key '{}'", key)));
    }

    let scope = scope
        .ok_or_else(|| DeclError::Scope("deps record has no owning entity".to_string()))?;

    let mut narrowed = scope.clone();
    if let Some(elem) = block.get("elem") {
        let Value::String(elem) = elem else {
            return Err(DeclError::Format("'elem' must be a string".to_string()));
        };
        let entity = EntityRef::new(scope.entity.block_name(), Some(elem), None)
            .map_err(|e| DeclError::Format(e.to_string()))?;
        narrowed.entity = entity;
    }
    if let Some(tech) = block.get("tech") {
        let Value::String(tech) = tech else {
            return Err(DeclError::Format("'tech' must be a string".to_string()));
        };
        narrowed.tech = Some(tech.clone());
    }
    Ok(narrowed)
}
