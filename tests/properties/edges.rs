use std::collections::HashSet;

use harvest::domain::services::{parse, DepsRecord};
use harvest::Cell;
use proptest::prelude::*;
use serde_json::{json, Value};

const NAMES: [&str; 4] = ["a", "b", "c", "d"];

#[derive(Debug, Clone)]
enum Op {
    Must(usize, usize),
    Should(usize, usize),
    No(usize, usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let pair = (0..NAMES.len(), 0..NAMES.len());
    prop_oneof![
        pair.clone().prop_map(|(s, d)| Op::Must(s, d)),
        pair.clone().prop_map(|(s, d)| Op::Should(s, d)),
        pair.prop_map(|(s, d)| Op::No(s, d)),
    ]
}

fn record(op: &Op) -> DepsRecord {
    let (scope, data): (usize, Value) = match op {
        Op::Must(s, d) => (*s, json!({"mustDeps": NAMES[*d]})),
        Op::Should(s, d) => (*s, json!({"shouldDeps": NAMES[*d]})),
        Op::No(s, d) => (*s, json!({"noDeps": NAMES[*d]})),
    };
    DepsRecord::new(Cell::parse(NAMES[scope]).unwrap(), data)
}

proptest! {
    #[test]
    fn edges_are_unique_and_must_first(ops in prop::collection::vec(op_strategy(), 0..20)) {
        let records: Vec<DepsRecord> = ops.iter().map(record).collect();
        let edges = parse(&records).unwrap();

        let mut seen = HashSet::new();
        for edge in &edges {
            prop_assert!(seen.insert(edge.clone()), "duplicate edge {:?}", edge);
            prop_assert_ne!(&edge.vertex, &edge.depend_on);
        }

        let first_should = edges.iter().position(|e| !e.ordered).unwrap_or(edges.len());
        prop_assert!(edges[first_should..].iter().all(|e| !e.ordered));
    }

    #[test]
    fn no_deps_pairs_never_survive(ops in prop::collection::vec(op_strategy(), 0..20)) {
        let records: Vec<DepsRecord> = ops.iter().map(record).collect();
        let edges = parse(&records).unwrap();

        let removed: HashSet<(usize, usize)> = ops
            .iter()
            .filter_map(|op| match op {
                Op::No(s, d) => Some((*s, *d)),
                _ => None,
            })
            .collect();

        for edge in &edges {
            let v = NAMES.iter().position(|n| *n == edge.vertex.id()).unwrap();
            let d = NAMES.iter().position(|n| *n == edge.depend_on.id()).unwrap();
            prop_assert!(!removed.contains(&(v, d)), "{:?} survived noDeps", edge);
        }
    }
}
