//! Loading and saving data files.
//!
//! The format is implied by the file extension (see [`Format::from_path`]).
//! Both formats serialize [`Dataset`] fields in declaration order, so saved
//! files have a stable key order and diff cleanly.
//!
//! ```ignore
//! let data = store::load(Path::new("kitchen.yaml"))?;
//! store::save(Path::new("kitchen.json"), &data)?;
//! ```

mod error;
mod format;

pub use error::StoreError;
pub use format::Format;

use std::path::Path;

use crate::dataset::Dataset;

/// Resolves the format for `path` or fails with [`StoreError::UnsupportedFormat`].
pub fn format_for(path: &Path) -> Result<Format, StoreError> {
    Format::from_path(path).ok_or_else(|| StoreError::UnsupportedFormat(path.to_path_buf()))
}

/// Reads a dataset from `path`.
///
/// The extension is checked before the file is opened, so an unsupported
/// path fails with [`StoreError::UnsupportedFormat`] even if it does not exist.
pub fn load(path: &Path) -> Result<Dataset, StoreError> {
    let format = format_for(path)?;
    let text = std::fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    let data = format.parse(&text).map_err(|message| StoreError::Parse {
        path: path.to_path_buf(),
        message,
    })?;
    log::info!(
        "Loaded {} ({format}): {} ingredients, {} recipes",
        path.display(),
        data.ingredients.len(),
        data.recipes.len()
    );
    Ok(data)
}

/// Writes `data` to `path`, replacing any existing file.
///
/// Parent directories are not created; a missing directory is reported as
/// [`StoreError::FileNotFound`].
pub fn save(path: &Path, data: &Dataset) -> Result<(), StoreError> {
    let format = format_for(path)?;
    let text = format.render(data).map_err(|message| StoreError::Serialize {
        path: path.to_path_buf(),
        message,
    })?;
    std::fs::write(path, text).map_err(|e| StoreError::io(path, e))?;
    log::info!(
        "Saved {} ({format}): {} ingredients, {} recipes",
        path.display(),
        data.ingredients.len(),
        data.recipes.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Ingredient, ItemAmount, Recipe};
    use std::path::PathBuf;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("larder_store_test_{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn sample() -> Dataset {
        let mut soup = Recipe::new(1, "Soup");
        soup.ingredients = vec![ItemAmount { id: 2, amount: 4 }];
        soup.products = vec![ItemAmount { id: 3, amount: 1 }];
        Dataset::new(
            vec![
                Ingredient::new(1, "Salt"),
                Ingredient::new(2, "Water"),
                Ingredient::new(3, "Broth"),
            ],
            vec![soup],
        )
    }

    #[test]
    fn save_then_load_each_format() {
        let dir = temp_dir("both_formats");
        for name in ["data.json", "data.yaml", "data.yml"] {
            let path = dir.join(name);
            save(&path, &sample()).unwrap();
            assert_eq!(load(&path).unwrap(), sample(), "{name}");
        }
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn convert_between_formats() {
        let dir = temp_dir("convert");
        let yaml = dir.join("kitchen.yaml");
        let json = dir.join("kitchen.json");

        save(&yaml, &sample()).unwrap();
        save(&json, &load(&yaml).unwrap()).unwrap();
        let text = std::fs::read_to_string(&json).unwrap();
        assert!(text.starts_with("{\n    \"ingredients\""));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn unsupported_extension_checked_first() {
        let err = load(Path::new("/definitely/missing/data.csv")).unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedFormat(_)));

        let err = save(Path::new("no_extension"), &Dataset::default()).unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedFormat(_)));
    }

    #[test]
    fn missing_file() {
        let dir = temp_dir("missing");
        let err = load(&dir.join("nope.json")).unwrap_err();
        assert!(matches!(err, StoreError::FileNotFound(_)));

        let err = save(&dir.join("no/such/dir.yaml"), &sample()).unwrap_err();
        assert!(matches!(err, StoreError::FileNotFound(_)));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn parse_error_names_the_file() {
        let dir = temp_dir("parse_error");
        let path = dir.join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
        assert!(err.to_string().contains("broken.json"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
