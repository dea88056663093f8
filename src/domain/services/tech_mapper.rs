//! Technology mapper
//!
//! Expands declared (abstract) technologies into the concrete file
//! technologies that satisfy them.

use serde::Serialize;

use crate::domain::entities::Cell;
use crate::domain::value_objects::TechAliases;

/// A concrete cell plus where it came from.
///
/// `origin` is the position of the declared cell that produced it, `rank`
/// its position inside that tech's alias list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpandedCell {
    pub cell: Cell,
    pub origin: usize,
    pub rank: usize,
}

/// Expand every cell through `aliases`, keeping declaration order.
///
/// A cell whose tech has an alias entry fans out in alias order; other cells
/// pass through as a singleton.
pub fn expand(cells: &[Cell], aliases: &TechAliases) -> Vec<ExpandedCell> {
    let mut expanded = Vec::with_capacity(cells.len());

    for (origin, cell) in cells.iter().enumerate() {
        match cell.tech() {
            Some(tech) => {
                for (rank, concrete) in aliases.concrete(tech).into_iter().enumerate() {
                    expanded.push(ExpandedCell {
                        cell: Cell::with_tech(cell.entity.clone(), concrete),
                        origin,
                        rank,
                    });
                }
            }
            None => expanded.push(ExpandedCell {
                cell: cell.clone(),
                origin,
                rank: 0,
            }),
        }
    }

    expanded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(raw: &str) -> Cell {
        Cell::parse(raw).unwrap()
    }

    fn keys(cells: &[ExpandedCell]) -> Vec<(String, usize, usize)> {
        cells
            .iter()
            .map(|c| (c.cell.key(), c.origin, c.rank))
            .collect()
    }

    #[test]
    fn aliased_tech_fans_out_in_alias_order() {
        let aliases = TechAliases::new().with("js", &["vanilla.js", "js"]);
        let out = expand(&[cell("b1.js"), cell("b2.css")], &aliases);
        assert_eq!(
            keys(&out),
            vec![
                ("b1.vanilla.js".to_string(), 0, 0),
                ("b1.js".to_string(), 0, 1),
                ("b2.css".to_string(), 1, 0),
            ]
        );
    }

    #[test]
    fn alias_list_without_the_tech_itself_replaces_it() {
        let aliases = TechAliases::new().with("css", &["styl"]);
        let out = expand(&[cell("b1.css")], &aliases);
        assert_eq!(keys(&out), vec![("b1.styl".to_string(), 0, 0)]);
    }

    #[test]
    fn techless_cells_pass_through() {
        let aliases = TechAliases::new().with("js", &["vanilla.js"]);
        let out = expand(&[cell("b1"), cell("b2.js")], &aliases);
        assert_eq!(
            keys(&out),
            vec![
                ("b1".to_string(), 0, 0),
                ("b2.vanilla.js".to_string(), 1, 0)
            ]
        );
    }

    #[test]
    fn empty_aliases_are_identity() {
        let cells = vec![cell("b2.js"), cell("b1.css")];
        let out = expand(&cells, &TechAliases::new());
        let back: Vec<Cell> = out.into_iter().map(|c| c.cell).collect();
        assert_eq!(back, cells);
    }
}
