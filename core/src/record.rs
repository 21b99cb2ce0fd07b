//! Typed rows for the ingredient and recipe tables.
//!
//! Field order in each struct is the key order used when saving.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::form::FormError;

/// A row of the ingredients table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
}

impl Ingredient {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// An ingredient reference with a quantity, used by recipe inputs and outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAmount {
    pub id: i64,
    pub amount: i64,
}

impl ItemAmount {
    /// The row inserted by "Add Ingredient" / "Add Product".
    pub const PLACEHOLDER: ItemAmount = ItemAmount { id: 1, amount: 0 };
}

/// A row of the recipes table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub ingredients: Vec<ItemAmount>,
    #[serde(default)]
    pub products: Vec<ItemAmount>,
}

impl Recipe {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            duration: 0,
            ingredients: Vec::new(),
            products: Vec::new(),
        }
    }
}

/// A scalar field that can be edited through a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Id,
    Name,
    Duration,
}

/// A parsed form value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Name => "name",
            Field::Duration => "duration",
        }
    }

    /// Looks a field up by its label, ignoring ASCII case.
    pub fn from_label(label: &str) -> Option<Field> {
        [Field::Id, Field::Name, Field::Duration]
            .into_iter()
            .find(|field| field.label().eq_ignore_ascii_case(label))
    }

    /// Parses raw form text into a value of this field's type.
    ///
    /// Ids and durations accept only non-negative decimal integers (no sign,
    /// no surrounding whitespace). Names must contain a non-whitespace
    /// character and are kept verbatim.
    pub fn parse(self, input: &str) -> Result<FieldValue, FormError> {
        let invalid = |reason: &str| FormError::InvalidInput {
            field: self,
            input: input.to_owned(),
            reason: reason.to_owned(),
        };

        match self {
            Field::Id | Field::Duration => parse_count(input)
                .map(FieldValue::Integer)
                .ok_or_else(|| invalid("expected a non-negative whole number")),
            Field::Name => {
                if input.trim().is_empty() {
                    Err(invalid("must not be empty"))
                } else {
                    Ok(FieldValue::Text(input.to_owned()))
                }
            }
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses a non-negative decimal integer the way a digits-only text box would.
pub(crate) fn parse_count(input: &str) -> Option<i64> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    input.parse().ok()
}

/// Common interface of table rows so tabs and scanners can be generic.
pub trait Record: Clone + PartialEq + fmt::Debug {
    /// Human-readable table name, e.g. `"Ingredients"`.
    const TABLE: &'static str;

    fn id(&self) -> i64;

    fn name(&self) -> &str;

    /// A freshly added row.
    fn blank(id: i64, name: String) -> Self;

    /// The scalar fields shown in this record's form, in display order.
    fn fields() -> &'static [Field];

    /// Current value of `field` as form text, or `None` if the record has no
    /// such field.
    fn field_text(&self, field: Field) -> Option<String>;

    /// Writes a parsed value into `field`.
    fn apply_field(&mut self, field: Field, value: FieldValue) -> Result<(), FormError>;
}

fn mismatched(field: Field, value: &FieldValue) -> FormError {
    FormError::InvalidInput {
        field,
        input: format!("{value:?}"),
        reason: "value does not match field type".to_owned(),
    }
}

impl Record for Ingredient {
    const TABLE: &'static str = "Ingredients";

    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn blank(id: i64, name: String) -> Self {
        Self { id, name }
    }

    fn fields() -> &'static [Field] {
        &[Field::Id, Field::Name]
    }

    fn field_text(&self, field: Field) -> Option<String> {
        match field {
            Field::Id => Some(self.id.to_string()),
            Field::Name => Some(self.name.clone()),
            Field::Duration => None,
        }
    }

    fn apply_field(&mut self, field: Field, value: FieldValue) -> Result<(), FormError> {
        match (field, value) {
            (Field::Id, FieldValue::Integer(id)) => self.id = id,
            (Field::Name, FieldValue::Text(name)) => self.name = name,
            (field, value) => return Err(mismatched(field, &value)),
        }
        Ok(())
    }
}

impl Record for Recipe {
    const TABLE: &'static str = "Recipes";

    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn blank(id: i64, name: String) -> Self {
        Self::new(id, name)
    }

    fn fields() -> &'static [Field] {
        &[Field::Id, Field::Name, Field::Duration]
    }

    fn field_text(&self, field: Field) -> Option<String> {
        match field {
            Field::Id => Some(self.id.to_string()),
            Field::Name => Some(self.name.clone()),
            Field::Duration => Some(self.duration.to_string()),
        }
    }

    fn apply_field(&mut self, field: Field, value: FieldValue) -> Result<(), FormError> {
        match (field, value) {
            (Field::Id, FieldValue::Integer(id)) => self.id = id,
            (Field::Name, FieldValue::Text(name)) => self.name = name,
            (Field::Duration, FieldValue::Integer(duration)) => self.duration = duration,
            (field, value) => return Err(mismatched(field, &value)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_integer_fields() {
        assert_eq!(Field::Id.parse("42"), Ok(FieldValue::Integer(42)));
        assert_eq!(Field::Duration.parse("0"), Ok(FieldValue::Integer(0)));
        for bad in ["", "-1", "+3", " 7", "1.5", "abc", "99999999999999999999"] {
            assert!(Field::Id.parse(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn parse_name_field() {
        assert_eq!(
            Field::Name.parse("Sea salt"),
            Ok(FieldValue::Text("Sea salt".into()))
        );
        let err = Field::Name.parse("   ").unwrap_err();
        assert!(matches!(err, FormError::InvalidInput { field: Field::Name, .. }));
    }

    #[test]
    fn field_labels_round_trip() {
        for field in [Field::Id, Field::Name, Field::Duration] {
            assert_eq!(Field::from_label(field.label()), Some(field));
        }
        assert_eq!(Field::from_label("NAME"), Some(Field::Name));
        assert_eq!(Field::from_label("amount"), None);
    }

    #[test]
    fn ingredient_has_no_duration() {
        let mut salt = Ingredient::new(1, "Salt");
        assert_eq!(salt.field_text(Field::Duration), None);
        assert!(
            salt.apply_field(Field::Duration, FieldValue::Integer(3))
                .is_err()
        );
        salt.apply_field(Field::Name, FieldValue::Text("Sugar".into()))
            .unwrap();
        assert_eq!(salt.name, "Sugar");
    }

    #[test]
    fn recipe_fields() {
        let mut bread = Recipe::blank(2, "Bread".into());
        assert_eq!(bread.field_text(Field::Duration).as_deref(), Some("0"));
        bread
            .apply_field(Field::Duration, FieldValue::Integer(45))
            .unwrap();
        assert_eq!(bread.duration, 45);
        assert_eq!(Recipe::fields(), &[Field::Id, Field::Name, Field::Duration]);
    }

    #[test]
    fn recipe_defaults_on_deserialize() {
        let recipe: Recipe = serde_json::from_str(r#"{"id": 3, "name": "Toast"}"#).unwrap();
        assert_eq!(recipe, Recipe::new(3, "Toast"));
    }
}
