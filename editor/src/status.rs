use std::fmt;

/// The three banners shown under the tabs: info, warnings and error.
///
/// The error banner is transient; the session clears it before running the
/// next command. Info and warnings stay until replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLine {
    info: Option<String>,
    warnings: Vec<String>,
    error: Option<String>,
    changed: bool,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_info(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::info!("{message}");
        self.info = Some(message);
        self.changed = true;
    }

    /// Replaces the warning banner. Only marks a change if the text differs.
    pub fn set_warnings(&mut self, warnings: Vec<String>) {
        if warnings != self.warnings {
            for warning in &warnings {
                log::warn!("{warning}");
            }
            self.warnings = warnings;
            self.changed = true;
        }
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::error!("{message}");
        self.error = Some(message);
        self.changed = true;
    }

    pub fn clear_error(&mut self) {
        if self.error.take().is_some() {
            self.changed = true;
        }
    }

    /// Returns whether anything changed since the last call, resetting the flag.
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    /// Banner lines in display order, one per non-empty slot and warning.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(info) = self.info() {
            lines.push(format!("[info] {info}"));
        }
        lines.extend(self.warnings().iter().map(|w| format!("[warn] {w}")));
        if let Some(error) = self.error() {
            lines.push(format!("[error] {error}"));
        }
        lines
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}
