//! Harvester
//!
//! Filters a level snapshot against an expanded declaration and orders the
//! survivors by declaration position, level priority, alias rank, then path.

use std::collections::HashMap;

use crate::domain::entities::{Cell, FileEntity};
use crate::domain::services::tech_mapper::{expand, ExpandedCell};
use crate::domain::value_objects::TechAliases;

/// Sort position of a declared cell: `(origin, rank)`.
type Slot = (usize, usize);

/// Lookup from file keys back to the declared cell that asked for them.
#[derive(Debug, Default)]
struct DeclIndex {
    exact: HashMap<String, Slot>,
    any_tech: HashMap<String, Slot>,
}

impl DeclIndex {
    fn build(declaration: &[ExpandedCell]) -> Self {
        let mut index = Self::default();
        for item in declaration {
            let slot = (item.origin, item.rank);
            let (map, key) = match item.cell.tech() {
                Some(_) => (&mut index.exact, item.cell.key()),
                None => (&mut index.any_tech, item.cell.id().to_string()),
            };
            map.entry(key).or_insert(slot);
        }
        index
    }

    fn slot(&self, file: &FileEntity) -> Option<Slot> {
        let exact = self.exact.get(&file.key()).copied();
        let any = self.any_tech.get(file.entity.id()).copied();
        match (exact, any) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

/// Select and order the files that satisfy `declaration`.
///
/// Files on levels outside `levels` are dropped. An empty result is not an
/// error here; callers decide whether to warn.
pub fn harvest(
    files: &[FileEntity],
    levels: &[String],
    declaration: &[ExpandedCell],
) -> Vec<FileEntity> {
    let index = DeclIndex::build(declaration);
    let level_pos: HashMap<&str, usize> = levels
        .iter()
        .enumerate()
        .rev()
        .map(|(pos, level)| (level.as_str(), pos))
        .collect();

    let mut picked: Vec<(Slot, usize, &FileEntity)> = files
        .iter()
        .filter_map(|file| {
            let level = *level_pos.get(file.level.as_str())?;
            let slot = index.slot(file)?;
            Some((slot, level, file))
        })
        .collect();

    picked.sort_by(|(a_slot, a_level, a), (b_slot, b_level, b)| {
        a_slot
            .0
            .cmp(&b_slot.0)
            .then(a_level.cmp(b_level))
            .then(a_slot.1.cmp(&b_slot.1))
            .then_with(|| a.path.cmp(&b.path))
    });

    log::debug!(
        "harvested {} of {} files for {} declared cells",
        picked.len(),
        files.len(),
        declaration.len()
    );

    picked.into_iter().map(|(_, _, file)| file.clone()).collect()
}

/// Expand `declaration` through `aliases` and harvest in one step.
pub fn harvest_declaration(
    files: &[FileEntity],
    levels: &[String],
    declaration: &[Cell],
    aliases: &TechAliases,
) -> Vec<FileEntity> {
    harvest(files, levels, &expand(declaration, aliases))
}

#[cfg(test)]
mod tests;
