use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::dataset::Dataset;

/// Serialization format of a data file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// `.json`, four-space indented.
    Json,
    /// `.yaml` / `.yml`, block style.
    Yaml,
}

impl Format {
    /// Picks the format from a path's extension, ignoring ASCII case.
    pub fn from_path(path: &Path) -> Option<Format> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            _ => None,
        }
    }

    /// The canonical file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
        }
    }

    /// Decodes a dataset.
    ///
    /// Returns `Err` with a human-readable message on malformed input.
    pub fn parse(self, text: &str) -> Result<Dataset, String> {
        match self {
            Format::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            Format::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
        }
    }

    /// Encodes a dataset as indented text ending with a newline.
    pub fn render(self, data: &Dataset) -> Result<String, String> {
        match self {
            Format::Json => {
                let mut out = Vec::new();
                let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
                let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
                data.serialize(&mut serializer).map_err(|e| e.to_string())?;
                out.push(b'\n');
                String::from_utf8(out).map_err(|e| e.to_string())
            }
            Format::Yaml => serde_yaml::to_string(data).map_err(|e| e.to_string()),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => f.write_str("JSON"),
            Format::Yaml => f.write_str("YAML"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Ingredient, ItemAmount, Recipe};

    fn sample() -> Dataset {
        let mut bread = Recipe::new(1, "Bread");
        bread.duration = 20;
        bread.ingredients = vec![ItemAmount { id: 1, amount: 3 }];
        Dataset::new(vec![Ingredient::new(1, "Flour")], vec![bread])
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path(Path::new("a/b.json")), Some(Format::Json));
        assert_eq!(Format::from_path(Path::new("b.YAML")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("b.yml")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("b.toml")), None);
        assert_eq!(Format::from_path(Path::new("json")), None);
    }

    #[test]
    fn json_layout() {
        let text = Format::Json.render(&sample()).unwrap();
        let expected = r#"{
    "ingredients": [
        {
            "id": 1,
            "name": "Flour"
        }
    ],
    "recipes": [
        {
            "id": 1,
            "name": "Bread",
            "duration": 20,
            "ingredients": [
                {
                    "id": 1,
                    "amount": 3
                }
            ],
            "products": []
        }
    ]
}
"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn yaml_keeps_field_order() {
        let text = Format::Yaml.render(&sample()).unwrap();
        let id = text.find("id: 1").unwrap();
        let name = text.find("name: Flour").unwrap();
        let duration = text.find("duration: 20").unwrap();
        assert!(id < name && name < duration);
        assert!(!text.contains('{'), "expected block style: {text}");
    }

    #[test]
    fn yaml_text_loads_into_typed_rows() {
        let text = "\
ingredients:
- id: 4
  name: Egg
recipes:
- id: 2
  name: Omelette
  ingredients:
  - id: 4
    amount: 2
";
        let data = Format::Yaml.parse(text).unwrap();
        assert_eq!(data.ingredients, vec![Ingredient::new(4, "Egg")]);
        assert_eq!(data.recipes[0].duration, 0);
        assert_eq!(data.recipes[0].ingredients, vec![ItemAmount { id: 4, amount: 2 }]);
        assert!(data.recipes[0].products.is_empty());
    }

    #[test]
    fn missing_tables_default_to_empty() {
        assert_eq!(Format::Json.parse("{}").unwrap(), Dataset::default());
        let only_ingredients = Format::Json
            .parse(r#"{"ingredients": [{"id": 1, "name": "Salt"}]}"#)
            .unwrap();
        assert!(only_ingredients.recipes.is_empty());
    }

    #[test]
    fn malformed_input_is_an_error() {
        assert!(Format::Json.parse("{\"ingredients\": [").is_err());
        assert!(
            Format::Json
                .parse(r#"{"ingredients": [{"id": "one", "name": "Salt"}]}"#)
                .is_err()
        );
        assert!(Format::Yaml.parse("ingredients: 5").is_err());
    }
}
