//! One open document: both tabs, the banners and the file they came from.

use std::fmt;
use std::path::{Path, PathBuf};

use larder_core::Dataset;
use larder_core::form::{EventQueue, FormEvent, RecipesTab, RecordTab};
use larder_core::record::Ingredient;
use larder_core::store;
use larder_core::warnings::scan_dataset;

use crate::error::{CommandError, CommandResult};
use crate::status::StatusLine;

/// Which tab commands apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabKind {
    #[default]
    Ingredients,
    Recipes,
}

impl TabKind {
    pub fn label(self) -> &'static str {
        match self {
            TabKind::Ingredients => "ingredients",
            TabKind::Recipes => "recipes",
        }
    }

    /// Parses a tab name, accepting the singular form and ignoring case.
    pub fn from_label(label: &str) -> Option<TabKind> {
        let label = label.to_ascii_lowercase();
        match label.trim_end_matches('s') {
            "ingredient" => Some(TabKind::Ingredients),
            "recipe" => Some(TabKind::Recipes),
            _ => None,
        }
    }
}

impl fmt::Display for TabKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub struct Session {
    path: Option<PathBuf>,
    pub(crate) ingredients: RecordTab<Ingredient>,
    pub(crate) recipes: RecipesTab,
    pub(crate) active: TabKind,
    pub(crate) status: StatusLine,
    events: EventQueue,
    scan_duplicates: bool,
}

impl Session {
    /// Creates a session with an empty, unnamed document.
    ///
    /// With `scan_duplicates` set, the duplicate id scan runs whenever
    /// committed rows change.
    pub fn new(scan_duplicates: bool) -> Self {
        let events = EventQueue::new();
        Self {
            path: None,
            ingredients: RecordTab::new(Vec::new(), events.clone()),
            recipes: RecipesTab::new(Vec::new(), events.clone()),
            active: TabKind::default(),
            status: StatusLine::new(),
            events,
            scan_duplicates,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut StatusLine {
        &mut self.status
    }

    /// Committed rows of both tabs, as a save would write them.
    pub fn dataset(&self) -> Dataset {
        Dataset::new(self.ingredients.records(), self.recipes.tab().records())
    }

    /// Whether either tab has unconfirmed edits.
    pub fn is_dirty(&self) -> bool {
        self.ingredients.is_dirty() || self.recipes.tab().is_dirty()
    }

    /// Clears both tabs and forgets the file name.
    pub fn new_document(&mut self) {
        self.load(&Dataset::default());
        self.path = None;
        self.status.set_info("New file");
    }

    /// Loads `path` into both tabs.
    ///
    /// On failure the current document is left as it was.
    pub fn open(&mut self, path: &Path) -> CommandResult {
        let data = store::load(path)?;
        self.load(&data);
        self.path = Some(path.to_path_buf());
        self.status.set_info(format!(
            "Opened {} ({} ingredients, {} recipes)",
            path.display(),
            data.ingredients.len(),
            data.recipes.len()
        ));
        Ok(())
    }

    /// Writes committed rows back to the current file.
    pub fn save(&mut self) -> CommandResult {
        let path = self.path.clone().ok_or(CommandError::NoPath)?;
        self.write(&path)
    }

    /// Writes committed rows to `path`, which becomes the current file.
    pub fn save_as(&mut self, path: &Path) -> CommandResult {
        self.write(path)?;
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    /// Runs the duplicate id scan over committed rows and refreshes the
    /// warning banner. Returns the warning lines.
    pub fn detect_warnings(&mut self) -> Vec<String> {
        let warnings = scan_dataset(
            self.ingredients.rows().committed(),
            self.recipes.tab().rows().committed(),
        );
        self.status.set_warnings(warnings.clone());
        warnings
    }

    /// Drains pending form events into the banners.
    ///
    /// Rejected input sets the error banner. When the scan is enabled, any
    /// event that changed committed rows triggers [`detect_warnings`].
    ///
    /// [`detect_warnings`]: Self::detect_warnings
    pub fn pump_events(&mut self) -> Vec<FormEvent> {
        let events = self.events.drain();
        let mut rescan = false;
        for event in &events {
            log::debug!("{event:?}");
            if let FormEvent::InvalidInput { field, input, .. } = event {
                log::warn!("{}: rejected {field} {input:?}", event.table());
                self.status.set_error("Invalid input");
            }
            rescan |= event.changes_committed();
        }
        if rescan && self.scan_duplicates {
            self.detect_warnings();
        }
        events
    }

    fn load(&mut self, data: &Dataset) {
        self.ingredients.load(&data.ingredients);
        self.recipes.tab_mut().load(&data.recipes);
    }

    fn write(&mut self, path: &Path) -> CommandResult {
        store::save(path, &self.dataset())?;
        self.status.set_info("Data saved successfully");
        Ok(())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("path", &self.path)
            .field("active", &self.active)
            .field("ingredients", &self.ingredients)
            .field("recipes", &self.recipes)
            .finish()
    }
}
