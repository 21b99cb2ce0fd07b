//! Duplicate-id detection.
//!
//! Ids are meant to be unique per table but nothing enforces it while
//! editing (new entries get `len + 1`, which collides after a removal). The
//! host runs this scan periodically and shows the results as warnings.

use std::collections::HashMap;
use std::fmt;

use crate::record::{Ingredient, Recipe, Record};

/// An id shared by more than one entry of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateId {
    pub table: &'static str,
    pub id: i64,
    /// Names of every entry with this id, in table order.
    pub names: Vec<String>,
}

impl fmt::Display for DuplicateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Duplicate ID: [{}] found in entries: {:?}",
            self.id, self.names
        )
    }
}

/// Finds ids that occur more than once, in order of first occurrence.
pub fn find_duplicate_ids<R: Record>(records: &[R]) -> Vec<DuplicateId> {
    let mut counts: HashMap<i64, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.id()).or_default() += 1;
    }

    let mut duplicates: Vec<DuplicateId> = Vec::new();
    for record in records {
        let id = record.id();
        if counts.get(&id).copied().unwrap_or(0) < 2 {
            continue;
        }
        match duplicates.iter_mut().find(|dup| dup.id == id) {
            Some(dup) => dup.names.push(record.name().to_owned()),
            None => duplicates.push(DuplicateId {
                table: R::TABLE,
                id,
                names: vec![record.name().to_owned()],
            }),
        }
    }

    if !duplicates.is_empty() {
        log::debug!("{}: {} duplicate ids", R::TABLE, duplicates.len());
    }
    duplicates
}

/// Scans both tables and renders one warning line per duplicate id.
pub fn scan_dataset(ingredients: &[Ingredient], recipes: &[Recipe]) -> Vec<String> {
    find_duplicate_ids(ingredients)
        .into_iter()
        .chain(find_duplicate_ids(recipes))
        .map(|dup| format!("Warning! {dup}"))
        .collect()
}
