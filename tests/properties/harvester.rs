use std::collections::HashSet;

use harvest::{harvest_declaration, Cell, EntityRef, FileEntity, TechAliases};
use proptest::prelude::*;

const BLOCKS: [&str; 4] = ["b1", "b2", "b3", "b4"];
const TECHS: [&str; 3] = ["js", "css", "vanilla.js"];
const LEVELS: [&str; 3] = ["l1", "l2", "l3"];

fn files_strategy() -> impl Strategy<Value = Vec<FileEntity>> {
    prop::collection::vec((0..BLOCKS.len(), 0..TECHS.len(), 0..LEVELS.len()), 0..24).prop_map(
        |raw| {
            let mut seen = HashSet::new();
            raw.into_iter()
                .filter(|key| seen.insert(*key))
                .map(|(b, t, l)| {
                    FileEntity::new(
                        EntityRef::block(BLOCKS[b]).unwrap(),
                        TECHS[t],
                        LEVELS[l],
                        format!("{}/{}/{}.{}", LEVELS[l], BLOCKS[b], BLOCKS[b], TECHS[t]),
                    )
                })
                .collect()
        },
    )
}

fn declaration_strategy() -> impl Strategy<Value = Vec<Cell>> {
    prop::collection::vec((0..BLOCKS.len(), 0..2usize), 1..5).prop_map(|raw| {
        raw.into_iter()
            .map(|(b, t)| Cell::parse(&format!("{}.{}", BLOCKS[b], TECHS[t])).unwrap())
            .collect()
    })
}

fn levels() -> Vec<String> {
    LEVELS.iter().map(|l| l.to_string()).collect()
}

proptest! {
    #[test]
    fn output_ignores_input_order(
        files in files_strategy(),
        declaration in declaration_strategy(),
        shuffle in any::<prop::sample::Index>(),
    ) {
        let aliases = TechAliases::new().with("js", &["vanilla.js", "js"]);
        let expected = harvest_declaration(&files, &levels(), &declaration, &aliases);

        let mut rotated = files.clone();
        if !rotated.is_empty() {
            let by = shuffle.index(rotated.len());
            rotated.rotate_left(by);
        }
        rotated.reverse();
        let got = harvest_declaration(&rotated, &levels(), &declaration, &aliases);
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn output_is_a_matching_subset(files in files_strategy(), declaration in declaration_strategy()) {
        let out = harvest_declaration(&files, &levels(), &declaration, &TechAliases::new());
        let wanted: HashSet<String> = declaration.iter().map(Cell::key).collect();

        let mut seen = HashSet::new();
        for file in &out {
            prop_assert!(files.contains(file));
            prop_assert!(wanted.contains(&file.key()), "{} not declared", file.key());
            prop_assert!(seen.insert(file.path.clone()), "{} emitted twice", file.path.display());
        }

        let expected_count = files.iter().filter(|f| wanted.contains(&f.key())).count();
        prop_assert_eq!(out.len(), expected_count);
    }

    #[test]
    fn one_cell_lists_levels_in_priority_order(files in files_strategy()) {
        let declaration = vec![Cell::parse("b1.css").unwrap()];
        let out = harvest_declaration(&files, &levels(), &declaration, &TechAliases::new());
        let order: Vec<usize> = out
            .iter()
            .map(|f| LEVELS.iter().position(|l| *l == f.level).unwrap())
            .collect();
        let mut sorted = order.clone();
        sorted.sort_unstable();
        prop_assert_eq!(order, sorted);
    }
}
