//! Recipe tab: the generic record form plus ingredient and product rows.

use std::fmt;

use crate::record::{Ingredient, ItemAmount, Recipe, parse_count};

use super::error::{FormError, FormResult};
use super::event::EventQueue;
use super::tab::RecordTab;

/// Which list of a recipe a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKind {
    Ingredient,
    Product,
}

impl RowKind {
    pub fn label(self) -> &'static str {
        match self {
            RowKind::Ingredient => "ingredient",
            RowKind::Product => "product",
        }
    }

    /// Parses `ingredient(s)` / `product(s)`, ignoring ASCII case.
    pub fn from_label(label: &str) -> Option<RowKind> {
        let label = label.to_ascii_lowercase();
        match label.trim_end_matches('s') {
            "ingredient" => Some(RowKind::Ingredient),
            "product" => Some(RowKind::Product),
            _ => None,
        }
    }

    fn rows(self, recipe: &Recipe) -> &[ItemAmount] {
        match self {
            RowKind::Ingredient => &recipe.ingredients,
            RowKind::Product => &recipe.products,
        }
    }

    fn rows_mut(self, recipe: &mut Recipe) -> &mut Vec<ItemAmount> {
        match self {
            RowKind::Ingredient => &mut recipe.ingredients,
            RowKind::Product => &mut recipe.products,
        }
    }
}

impl fmt::Display for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Name of the catalog ingredient with `id`, if any.
pub fn name_for_id(catalog: &[Ingredient], id: i64) -> Option<&str> {
    catalog
        .iter()
        .find(|item| item.id == id)
        .map(|item| item.name.as_str())
}

/// Id of the first catalog ingredient named `name`, if any.
pub fn id_for_name(catalog: &[Ingredient], name: &str) -> Option<i64> {
    catalog.iter().find(|item| item.name == name).map(|item| item.id)
}

/// The recipes table.
///
/// Row operations take the ingredient catalog explicitly, since ingredients
/// are owned by a different tab. Row edits go to the selected recipe's
/// working copy and are committed by [`RecordTab::confirm`] like any other
/// field edit.
pub struct RecipesTab {
    tab: RecordTab<Recipe>,
}

impl RecipesTab {
    pub fn new(records: Vec<Recipe>, events: EventQueue) -> Self {
        Self {
            tab: RecordTab::new(records, events),
        }
    }

    pub fn tab(&self) -> &RecordTab<Recipe> {
        &self.tab
    }

    pub fn tab_mut(&mut self) -> &mut RecordTab<Recipe> {
        &mut self.tab
    }

    /// Appends a placeholder row to the selected recipe, returning its index.
    pub fn add_row(&mut self, kind: RowKind) -> FormResult<usize> {
        self.tab.edit_selected(|recipe| {
            let rows = kind.rows_mut(recipe);
            rows.push(ItemAmount::PLACEHOLDER);
            Ok(rows.len() - 1)
        })
    }

    /// Removes a row from the selected recipe.
    pub fn remove_row(&mut self, kind: RowKind, row: usize) -> FormResult<ItemAmount> {
        self.tab.edit_selected(|recipe| {
            let rows = kind.rows_mut(recipe);
            let len = rows.len();
            if row >= len {
                return Err(FormError::RowOutOfRange { row, len });
            }
            Ok(rows.remove(row))
        })
    }

    /// Points a row of the selected recipe at `item_name` with `amount_text`.
    pub fn set_row(
        &mut self,
        kind: RowKind,
        row: usize,
        catalog: &[Ingredient],
        item_name: &str,
        amount_text: &str,
    ) -> FormResult {
        let Some(id) = id_for_name(catalog, item_name) else {
            return Err(FormError::UnknownItem(item_name.to_owned()));
        };
        let Some(amount) = parse_count(amount_text) else {
            let err = FormError::InvalidAmount(amount_text.to_owned());
            self.tab.report_rejected(&err);
            return Err(err);
        };

        self.tab.edit_selected(|recipe| {
            let rows = kind.rows_mut(recipe);
            let len = rows.len();
            let slot = rows
                .get_mut(row)
                .ok_or(FormError::RowOutOfRange { row, len })?;
            *slot = ItemAmount { id, amount };
            Ok(())
        })
    }

    /// `(item name, amount)` for each row of the selected recipe.
    ///
    /// Rows whose id is missing from the catalog are labelled `"?"`.
    pub fn row_labels(&self, kind: RowKind, catalog: &[Ingredient]) -> FormResult<Vec<(String, i64)>> {
        let recipe = self.tab.selected_record().ok_or(FormError::NoSelection)?;
        Ok(kind
            .rows(recipe)
            .iter()
            .map(|row| {
                let name = name_for_id(catalog, row.id).unwrap_or("?");
                (name.to_owned(), row.amount)
            })
            .collect())
    }

    /// Catalog names offered in a row's dropdown, minus the current choice.
    pub fn options<'a>(catalog: &'a [Ingredient], current: Option<&str>) -> Vec<&'a str> {
        catalog
            .iter()
            .map(|item| item.name.as_str())
            .filter(|name| Some(*name) != current)
            .collect()
    }
}

impl fmt::Debug for RecipesTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecipesTab").field("tab", &self.tab).finish()
    }
}
