use serde::{Deserialize, Serialize};

use crate::record::{Ingredient, Recipe};

/// The contents of a data file: both tables.
///
/// Either table may be missing from the file, in which case it loads empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

impl Dataset {
    pub fn new(ingredients: Vec<Ingredient>, recipes: Vec<Recipe>) -> Self {
        Self {
            ingredients,
            recipes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty() && self.recipes.is_empty()
    }
}
