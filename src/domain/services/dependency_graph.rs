//! Dependency graph
//!
//! Cells are vertices; `depends_on` (ordered) and `link_with` (unordered)
//! edges connect them. One graph is built per resolution request and is
//! read-only once built.
//!
//! Tech resolution during closure queries: for a cell `(e, t)` the edges of
//! both `(e, *)` and `(e, t)` apply, and a dependency without a tech is taken
//! at `t`.

use std::collections::{HashMap, VecDeque};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::Serialize;

use crate::domain::entities::Cell;
use crate::domain::services::edge_parser::Edge;
use crate::error::{HarvestError, HarvestResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    DependsOn,
    LinkWith,
}

#[derive(Debug, Default)]
pub struct DependencyGraph {
    graph: DiGraph<Cell, Relation>,
    vertices: HashMap<Cell, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from parsed edges, creating vertices as edges reference them.
    pub fn build(edges: &[Edge]) -> Self {
        let mut graph = Self::new();
        for edge in edges {
            if edge.ordered {
                graph.depends_on(&edge.vertex, &edge.depend_on);
            } else {
                graph.link_with(&edge.vertex, &edge.depend_on);
            }
        }
        log::debug!(
            "dependency graph: {} vertices, {} edges",
            graph.vertex_count(),
            graph.edge_count()
        );
        graph
    }

    pub fn vertex(&mut self, cell: &Cell) -> NodeIndex {
        if let Some(idx) = self.vertices.get(cell) {
            return *idx;
        }
        let idx = self.graph.add_node(cell.clone());
        self.vertices.insert(cell.clone(), idx);
        idx
    }

    pub fn depends_on(&mut self, vertex: &Cell, dependency: &Cell) {
        let from = self.vertex(vertex);
        let to = self.vertex(dependency);
        self.graph.add_edge(from, to, Relation::DependsOn);
    }

    pub fn link_with(&mut self, vertex: &Cell, other: &Cell) {
        let from = self.vertex(vertex);
        let to = self.vertex(other);
        self.graph.add_edge(from, to, Relation::LinkWith);
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Direct neighbors of `cell`, resolved at the cell's tech, in edge insertion order.
    pub fn neighbors(&self, cell: &Cell) -> Vec<(Cell, Relation)> {
        let mut sources = vec![Cell::entity(cell.entity.clone())];
        if cell.tech.is_some() {
            sources.push(cell.clone());
        }

        let mut edges: Vec<_> = sources
            .iter()
            .filter_map(|c| self.vertices.get(c))
            .flat_map(|idx| self.graph.edges(*idx))
            .collect();
        edges.sort_by_key(|e| e.id().index());

        edges
            .into_iter()
            .map(|e| {
                let target = &self.graph[e.target()];
                let resolved = match cell.tech() {
                    Some(tech) => target.at_tech(tech),
                    None => target.clone(),
                };
                (resolved, *e.weight())
            })
            .collect()
    }

    /// Ordered closure of `targets` at `tech`.
    ///
    /// Members are collected breadth-first in first-seen order, then placed so
    /// that every `depends_on` target precedes its dependent; remaining ties
    /// keep first-seen order. A `depends_on` cycle is an error naming its cells.
    pub fn closure_of(&self, targets: &[Cell], tech: &str) -> HarvestResult<Vec<Cell>> {
        let seeds: Vec<Cell> = targets.iter().map(|t| t.at_tech(tech)).collect();
        self.closure(seeds)
    }

    /// Closure for several techs at once, seeded entity-major, tech-minor.
    pub fn closure_of_many(&self, targets: &[Cell], techs: &[String]) -> HarvestResult<Vec<Cell>> {
        let seeds: Vec<Cell> = targets
            .iter()
            .flat_map(|t| techs.iter().map(move |tech| t.at_tech(tech)))
            .collect();
        self.closure(seeds)
    }

    fn closure(&self, seeds: Vec<Cell>) -> HarvestResult<Vec<Cell>> {
        let mut members: Vec<Cell> = Vec::new();
        let mut position: HashMap<Cell, usize> = HashMap::new();
        let mut queue: VecDeque<usize> = VecDeque::new();
        // ordered dependencies of each member, by member index
        let mut deps: Vec<Vec<usize>> = Vec::new();

        let mut admit = |cell: Cell, members: &mut Vec<Cell>, queue: &mut VecDeque<usize>| {
            if let Some(&idx) = position.get(&cell) {
                return idx;
            }
            let idx = members.len();
            position.insert(cell.clone(), idx);
            members.push(cell);
            queue.push_back(idx);
            idx
        };

        for seed in seeds {
            admit(seed, &mut members, &mut queue);
        }

        while let Some(current) = queue.pop_front() {
            let cell = members[current].clone();
            let mut current_deps = Vec::new();
            for (neighbor, relation) in self.neighbors(&cell) {
                let idx = admit(neighbor, &mut members, &mut queue);
                if relation == Relation::DependsOn && idx != current && !current_deps.contains(&idx)
                {
                    current_deps.push(idx);
                }
            }
            if deps.len() <= current {
                deps.resize_with(current + 1, Vec::new);
            }
            deps[current] = current_deps;
        }
        deps.resize_with(members.len(), Vec::new);

        let order = stable_topological_order(&deps).map_err(|cycle| {
            HarvestError::CyclicDependency {
                cycle: cycle.into_iter().map(|idx| members[idx].key()).collect(),
            }
        })?;

        log::debug!(
            "closure: {} cells, {} ordering constraints",
            members.len(),
            deps.iter().map(Vec::len).sum::<usize>()
        );

        let mut slots: Vec<Option<Cell>> = members.into_iter().map(Some).collect();
        Ok(order
            .into_iter()
            .filter_map(|idx| slots[idx].take())
            .collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    Active,
    Done,
}

/// Depth-first placement: each member is emitted right after its ordered
/// dependencies, members visited in first-seen order.
///
/// On failure returns the member indices forming the cycle, in path order.
fn stable_topological_order(deps: &[Vec<usize>]) -> Result<Vec<usize>, Vec<usize>> {
    let count = deps.len();
    let mut state = vec![Visit::New; count];
    let mut order = Vec::with_capacity(count);

    for root in 0..count {
        if state[root] != Visit::New {
            continue;
        }
        state[root] = Visit::Active;
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];

        while let Some(&(node, cursor)) = stack.last() {
            match deps[node].get(cursor).copied() {
                Some(dep) => {
                    if let Some(top) = stack.last_mut() {
                        top.1 += 1;
                    }
                    match state[dep] {
                        Visit::New => {
                            state[dep] = Visit::Active;
                            stack.push((dep, 0));
                        }
                        Visit::Active => {
                            let start = stack.iter().position(|(n, _)| *n == dep).unwrap_or(0);
                            return Err(stack[start..].iter().map(|(n, _)| *n).collect());
                        }
                        Visit::Done => {}
                    }
                }
                None => {
                    state[node] = Visit::Done;
                    order.push(node);
                    stack.pop();
                }
            }
        }
    }

    Ok(order)
}
