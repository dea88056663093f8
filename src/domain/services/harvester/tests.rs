use super::*;

fn file(path: &str) -> FileEntity {
    let level = path.split('/').next().unwrap();
    let name = path.rsplit('/').next().unwrap();
    FileEntity::from_file_name(name, level, path).unwrap()
}

fn files(paths: &[&str]) -> Vec<FileEntity> {
    paths.iter().map(|p| file(p)).collect()
}

fn levels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn decl(cells: &[&str]) -> Vec<Cell> {
    cells.iter().map(|c| Cell::parse(c).unwrap()).collect()
}

fn check(
    introspection: &[&str],
    level_names: &[&str],
    declaration: &[&str],
    aliases: TechAliases,
    expected: &[&str],
) {
    let out = harvest_declaration(
        &files(introspection),
        &levels(level_names),
        &decl(declaration),
        &aliases,
    );
    let paths: Vec<String> = out.iter().map(|f| f.path.display().to_string()).collect();
    assert_eq!(paths, expected);
}

#[test]
fn filters_by_entity_and_tech() {
    check(
        &["l1/b2/b2.js", "l1/b2/b2.css", "l1/b3/b3.js"],
        &["l1"],
        &["b2.css"],
        TechAliases::new(),
        &["l1/b2/b2.css"],
    );
}

#[test]
fn filters_by_level() {
    check(
        &["l1/b1/b1.js", "l1/b2/b2.js", "l1/b2/b2.css", "l2/b2/b2.css", "l1/b3/b3.js"],
        &["l1"],
        &["b2.css"],
        TechAliases::new(),
        &["l1/b2/b2.css"],
    );
}

#[test]
fn sorts_by_level_priority() {
    check(
        &["l1/b1/b1.js", "l1/b2/b2.css", "l2/b2/b2.css", "l1/b3/b3.js"],
        &["l2", "l1"],
        &["b2.css"],
        TechAliases::new(),
        &["l2/b2/b2.css", "l1/b2/b2.css"],
    );
}

#[test]
fn keeps_declaration_order_across_entities() {
    check(
        &["l1/b1/b1.js", "l1/b2/b2.css", "l2/b2/b2.css", "l1/b3/b3.js"],
        &["l1"],
        &["b1.js", "b2.css"],
        TechAliases::new(),
        &["l1/b1/b1.js", "l1/b2/b2.css"],
    );
}

#[test]
fn declaration_order_outranks_level_order() {
    check(
        &[
            "l1/b1/b1.js",
            "l4/b2/b2.css",
            "l1/b2/b2.css",
            "l3/b2/b2.css",
            "l2/b2/b2.css",
            "l2/b3/b3.js",
        ],
        &["l3", "l2", "l1", "l4"],
        &["b1.js", "b2.css", "b3.js"],
        TechAliases::new(),
        &[
            "l1/b1/b1.js",
            "l3/b2/b2.css",
            "l2/b2/b2.css",
            "l1/b2/b2.css",
            "l4/b2/b2.css",
            "l2/b3/b3.js",
        ],
    );
}

#[test]
fn alias_techs_interleave_by_level() {
    check(
        &["l1/b1/b1.js", "l2/b1/b1.vanilla.js", "l3/b1/b1.js", "l4/b1/b1.vanilla.js"],
        &["l3", "l2", "l1", "l4"],
        &["b1.js"],
        TechAliases::new().with("js", &["js", "vanilla.js"]),
        &["l3/b1/b1.js", "l2/b1/b1.vanilla.js", "l1/b1/b1.js", "l4/b1/b1.vanilla.js"],
    );
}

#[test]
fn aliased_tech_matches_only_its_aliases() {
    check(
        &["l1/b1/b1.js", "l2/b1/b1.vanilla.js", "l3/b1/b1.js", "l4/b1/b1.vanilla.js"],
        &["l3", "l2", "l1", "l4"],
        &["b1.js"],
        TechAliases::new().with("js", &["vanilla.js"]),
        &["l2/b1/b1.vanilla.js", "l4/b1/b1.vanilla.js"],
    );
}

#[test]
fn same_entities_with_different_techs_follow_declaration() {
    check(
        &["l1/b1/b1.js", "l1/b2/b2.js", "l1/b1/b1.styl", "l1/b2/b2.styl"],
        &["l1"],
        &["b1.js", "b2.css", "b1.css", "b2.js"],
        TechAliases::new().with("css", &["styl"]),
        &["l1/b1/b1.js", "l1/b2/b2.styl", "l1/b1/b1.styl", "l1/b2/b2.js"],
    );
}

#[test]
fn shared_concrete_tech_serves_both_declared_techs() {
    check(
        &[
            "l1/b1/b1.js",
            "l1/b2/b2.js",
            "l1/b1/b1.react.js",
            "l1/b2/b2.react.js",
            "l1/b1/b1.vanilla.js",
            "l1/b2/b2.vanilla.js",
        ],
        &["l1"],
        &["b1.js", "b2.react"],
        TechAliases::new()
            .with("js", &["vanilla.js", "js"])
            .with("react", &["vanilla.js", "react.js"]),
        &[
            "l1/b1/b1.vanilla.js",
            "l1/b1/b1.js",
            "l1/b2/b2.vanilla.js",
            "l1/b2/b2.react.js",
        ],
    );
}

#[test]
fn techless_cell_takes_every_tech_of_the_entity() {
    check(
        &["l1/b1/b1.css", "l1/b1/b1.js", "l1/b2/b2.js"],
        &["l1"],
        &["b1"],
        TechAliases::new(),
        &["l1/b1/b1.css", "l1/b1/b1.js"],
    );
}

#[test]
fn empty_snapshot_gives_empty_result() {
    check(&[], &["l1"], &["b1.js"], TechAliases::new(), &[]);
}

#[test]
fn duplicate_level_names_use_first_position() {
    check(
        &["l1/b1/b1.js", "l2/b1/b1.js"],
        &["l1", "l2", "l1"],
        &["b1.js"],
        TechAliases::new(),
        &["l1/b1/b1.js", "l2/b1/b1.js"],
    );
}
