use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Editor configuration loaded from `larder.toml`.
///
/// Every section and key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EditorConfig {
    #[serde(default)]
    pub editor: EditorSection,
    #[serde(default)]
    pub warnings: WarningsSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EditorSection {
    /// Opened by `larder edit` when no file is given.
    pub default_file: Option<PathBuf>,
    /// `env_logger` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for EditorSection {
    fn default() -> Self {
        Self {
            default_file: None,
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WarningsSection {
    /// Re-run the duplicate id scan whenever committed rows change.
    #[serde(default = "default_true")]
    pub duplicate_ids: bool,
}

impl Default for WarningsSection {
    fn default() -> Self {
        Self {
            duplicate_ids: true,
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

fn default_true() -> bool {
    true
}

/// Load the editor config from a TOML file.
///
/// Returns `Err` with a human-readable message if the file cannot be read
/// or parsed.
pub fn load_config(path: &Path) -> Result<EditorConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    toml::from_str(&content).map_err(|e| format!("failed to parse {}: {e}", path.display()))
}

/// Load the editor config, falling back to defaults if the file is missing
/// or invalid.
///
/// The logger is not installed yet when this runs (its level comes from the
/// config), so the failure message is handed back for the caller to log.
pub fn load_or_default(path: &Path) -> (EditorConfig, Option<String>) {
    match load_config(path) {
        Ok(config) => (config, None),
        Err(e) => (EditorConfig::default(), Some(e)),
    }
}
