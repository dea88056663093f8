use std::collections::{HashMap, HashSet};

use harvest::{Cell, DependencyGraph, Edge, HarvestError};
use proptest::prelude::*;

const BLOCKS: [&str; 6] = ["b0", "b1", "b2", "b3", "b4", "b5"];

fn block(i: usize) -> Cell {
    Cell::parse(BLOCKS[i]).unwrap()
}

fn edges_strategy() -> impl Strategy<Value = Vec<(usize, usize, bool)>> {
    prop::collection::vec((0..BLOCKS.len(), 0..BLOCKS.len(), any::<bool>()), 0..14)
}

fn build(raw: &[(usize, usize, bool)]) -> DependencyGraph {
    let edges: Vec<Edge> = raw
        .iter()
        .filter(|(v, d, _)| v != d)
        .map(|(v, d, ordered)| {
            if *ordered {
                Edge::must(block(*v), block(*d))
            } else {
                Edge::should(block(*v), block(*d))
            }
        })
        .collect();
    DependencyGraph::build(&edges)
}

/// Every block reachable from the seeds through any edge kind.
fn reachable(raw: &[(usize, usize, bool)], seeds: &[usize]) -> HashSet<usize> {
    let mut seen: HashSet<usize> = seeds.iter().copied().collect();
    let mut stack: Vec<usize> = seeds.to_vec();
    while let Some(v) = stack.pop() {
        for (from, to, _) in raw {
            if *from == v && from != to && seen.insert(*to) {
                stack.push(*to);
            }
        }
    }
    seen
}

proptest! {
    #[test]
    fn closure_is_deterministic(raw in edges_strategy(), seeds in prop::collection::vec(0..BLOCKS.len(), 1..4)) {
        let targets: Vec<Cell> = seeds.iter().map(|i| block(*i)).collect();
        let first = build(&raw).closure_of(&targets, "js");
        let second = build(&raw).closure_of(&targets, "js");
        prop_assert_eq!(format!("{:?}", first), format!("{:?}", second));
    }

    #[test]
    fn closure_holds_exactly_the_reachable_cells(raw in edges_strategy(), seeds in prop::collection::vec(0..BLOCKS.len(), 1..4)) {
        let targets: Vec<Cell> = seeds.iter().map(|i| block(*i)).collect();
        if let Ok(closure) = build(&raw).closure_of(&targets, "js") {
            let got: HashSet<String> = closure.iter().map(Cell::key).collect();
            prop_assert_eq!(got.len(), closure.len(), "closure has duplicates");

            let expected: HashSet<String> = reachable(&raw, &seeds)
                .into_iter()
                .map(|i| format!("{}.js", BLOCKS[i]))
                .collect();
            prop_assert_eq!(got, expected);
        }
    }

    #[test]
    fn must_deps_precede_dependents(raw in edges_strategy(), seeds in prop::collection::vec(0..BLOCKS.len(), 1..4)) {
        let targets: Vec<Cell> = seeds.iter().map(|i| block(*i)).collect();
        match build(&raw).closure_of(&targets, "js") {
            Ok(closure) => {
                let pos: HashMap<String, usize> = closure
                    .iter()
                    .enumerate()
                    .map(|(i, c)| (c.key(), i))
                    .collect();
                for (v, d, ordered) in &raw {
                    let (Some(pv), Some(pd)) = (
                        pos.get(&format!("{}.js", BLOCKS[*v])),
                        pos.get(&format!("{}.js", BLOCKS[*d])),
                    ) else {
                        continue;
                    };
                    if *ordered && v != d {
                        prop_assert!(pd < pv, "{} must precede {}", BLOCKS[*d], BLOCKS[*v]);
                    }
                }
            }
            Err(HarvestError::CyclicDependency { cycle }) => {
                prop_assert!(cycle.len() >= 2);
            }
            Err(other) => prop_assert!(false, "unexpected error: {:?}", other),
        }
    }

    #[test]
    fn should_only_graphs_never_fail(raw in edges_strategy(), seeds in prop::collection::vec(0..BLOCKS.len(), 1..4)) {
        let unordered: Vec<(usize, usize, bool)> = raw.into_iter().map(|(v, d, _)| (v, d, false)).collect();
        let targets: Vec<Cell> = seeds.iter().map(|i| block(*i)).collect();
        let closure = build(&unordered).closure_of(&targets, "css");
        prop_assert!(closure.is_ok());
        // seeds keep first-seen order at the head
        let closure = closure.unwrap();
        let mut firsts: Vec<String> = Vec::new();
        for s in &seeds {
            let key = format!("{}.css", BLOCKS[*s]);
            if !firsts.contains(&key) {
                firsts.push(key);
            }
        }
        let head: Vec<String> = closure.iter().take(firsts.len()).map(Cell::key).collect();
        prop_assert_eq!(head, firsts);
    }
}
